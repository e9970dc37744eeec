//! String tables
//!
//! `{}` marks a value substituted by the caller.

pub(super) const EN: &[(&str, &str)] = &[
    ("page.title", "aPOGea"),
    ("subtitle", "Choose Your Class"),
    ("instructions", "Enter to select"),
    ("selected", "Class selected"),
    ("class.squire", "Squire"),
    ("class.knight", "Knight"),
    ("class.mage", "Mage"),
    ("class.rogue", "Rogue"),
    // Stats sheet
    ("screen.stats", "Stats"),
    ("screen.traits", "Traits"),
    ("stats.level", "Level"),
    ("stats.points", "Points"),
    ("stats.stat", "Stat"),
    ("stats.pts", "Pts"),
    ("stats.base", "Base"),
    ("stats.bonus", "Bonus"),
    ("stats.total", "Total"),
    ("stats.health", "Health"),
    ("stats.mana", "Mana"),
    ("stats.magic", "Magic"),
    ("stats.damage", "Damage"),
    ("stats.movespeed", "Move Speed"),
    ("stats.ability", "Ability"),
    ("stats.skill", "Skill"),
    ("stats.attackSpeed", "Attack Speed"),
    ("stats.hpRegen", "HP Regen"),
    ("stats.mpRegen", "MP Regen"),
    ("stats.range", "Range"),
    ("stats.armor", "Armor"),
    ("stats.defense", "Defense"),
    ("stats.capacity", "Capacity"),
    // Trait trees
    ("traits.points", "Trait points"),
    ("traits.comingSoon", "Coming soon"),
    ("traits.requirements", "Requirements"),
    ("traits.thresholds", "Levels"),
    ("traits.effect", "Effect"),
    ("traits.noRequirements", "None"),
    ("traits.active", "Active"),
    ("tree.axe", "Axe"),
    ("tree.sword", "Sword"),
    ("tree.staff", "Staff"),
    ("tree.orb", "Orb"),
    ("tree.shield", "Shield"),
    ("tree.glove", "Glove"),
    ("tree.bow", "Bow"),
    ("tree.light_armor", "Light Armor"),
    ("tree.heavy_armor", "Heavy Armor"),
    ("tree.dagger", "Dagger"),
    ("skill.going-big", "Going Big"),
    ("skill.steady-bloodflow", "Steady Bloodflow"),
    ("skill.wrecking-it", "Wrecking It"),
    ("skill.berserker", "Berserker"),
    ("skill.overwhelming-force", "Overwhelming Force"),
    ("skill.magic-blade", "Magic Blade"),
    ("skill.unfathomable-rage", "Unfathomable Rage"),
    ("skilldesc.going-big", "Large weapons deal extra damage"),
    ("skilldesc.steady-bloodflow", "Casting spells with health regenerates mana"),
    ("skilldesc.wrecking-it", "Blade/Physical spell buffs next attack's True Damage"),
    ("skilldesc.berserker", "Below 66% health grants extra damage"),
    ("skilldesc.overwhelming-force", "Large weapon attacks may cast area-of-effect spell"),
    ("skilldesc.magic-blade", "Removes negatives on Large weapons; gain 10% Manaleech"),
    ("skilldesc.unfathomable-rage", "Converts every 2 damage taken into 1 mana; doubles cost"),
    ("skilleffect.going-big", "20% extra damage at max level"),
    ("skilleffect.steady-bloodflow", "+12 mana at max level"),
    ("skilleffect.wrecking-it", "+14 damage at max level"),
    ("skilleffect.berserker", "+13 damage at max level"),
    ("skilleffect.overwhelming-force", "Constant effect"),
    ("skilleffect.magic-blade", "Constant effect"),
    ("skilleffect.unfathomable-rage", "Constant effect"),
    // Feedback
    ("feedback.noPoints", "No points available"),
    ("feedback.prereqUnmet", "Requirements not met"),
    ("feedback.alreadyMax", "Already at max level"),
    ("feedback.downgradeBlocked", "Required by {}"),
    ("feedback.notAllocated", "Nothing to remove"),
    ("feedback.invalidLevel", "Level must be between 1 and 100"),
    ("feedback.statLocked", "This stat cannot be edited"),
    ("feedback.statCapped", "At most {} point(s) per stat at this level"),
    ("feedback.treeReset", "Tree reset"),
    ("feedback.statsReset", "Stats reset"),
    ("feedback.soundOn", "Sound on"),
    ("feedback.soundOff", "Sound off"),
    ("feedback.language", "Language: English"),
    // Confirmations
    ("confirm.levelTitle", "Lower level?"),
    ("confirm.levelBody", "{} point(s) over budget. Reset and apply?"),
    ("confirm.resetTitle", "Reset tree?"),
    ("confirm.resetBody", "Refund every point in this tree?"),
    ("confirm.hint", "[y] Yes   [n] No"),
    // Key hints
    ("help.classes", "←/→ choose  Enter select  g language  m sound  q quit"),
    ("help.stats", "↑/↓ stat  +/- points  [/] level  ←/→ class  r reset  t traits  q back"),
    ("help.traits", "Tab skill  Space upgrade  - downgrade  ←/→ tree  1-0 tree  [/] level  Esc close  ^R reset  q back"),
];

pub(super) const PT_BR: &[(&str, &str)] = &[
    ("subtitle", "Escolha Sua Classe"),
    ("instructions", "Enter para selecionar"),
    ("selected", "Classe selecionada"),
    ("class.squire", "Escudeiro"),
    ("class.knight", "Cavaleiro"),
    ("class.mage", "Mago"),
    ("class.rogue", "Ladino"),
    ("screen.stats", "Atributos"),
    ("screen.traits", "Talentos"),
    ("stats.level", "Nível"),
    ("stats.points", "Pontos"),
    ("stats.stat", "Atributo"),
    ("stats.pts", "Pts"),
    ("stats.base", "Base"),
    ("stats.bonus", "Bônus"),
    ("stats.total", "Total"),
    ("stats.health", "Vida"),
    ("stats.mana", "Mana"),
    ("stats.magic", "Magia"),
    ("stats.damage", "Dano"),
    ("stats.movespeed", "Velocidade"),
    ("stats.ability", "Habilidade"),
    ("stats.skill", "Perícia"),
    ("stats.attackSpeed", "Vel. de Ataque"),
    ("stats.hpRegen", "Regen. de Vida"),
    ("stats.mpRegen", "Regen. de Mana"),
    ("stats.range", "Alcance"),
    ("stats.armor", "Armadura"),
    ("stats.defense", "Defesa"),
    ("stats.capacity", "Capacidade"),
    ("traits.points", "Pontos de talento"),
    ("traits.comingSoon", "Em breve"),
    ("traits.requirements", "Requisitos"),
    ("traits.thresholds", "Níveis"),
    ("traits.effect", "Efeito"),
    ("traits.noRequirements", "Nenhum"),
    ("traits.active", "Ativo"),
    ("tree.axe", "Machado"),
    ("tree.sword", "Espada"),
    ("tree.staff", "Cajado"),
    ("tree.orb", "Orbe"),
    ("tree.shield", "Escudo"),
    ("tree.glove", "Luva"),
    ("tree.bow", "Arco"),
    ("tree.light_armor", "Armadura Leve"),
    ("tree.heavy_armor", "Armadura Pesada"),
    ("tree.dagger", "Adaga"),
    ("skill.going-big", "Pensando Grande"),
    ("skill.steady-bloodflow", "Fluxo Sanguíneo"),
    ("skill.wrecking-it", "Destruidor"),
    ("skill.berserker", "Berserker"),
    ("skill.overwhelming-force", "Força Esmagadora"),
    ("skill.magic-blade", "Lâmina Mágica"),
    ("skill.unfathomable-rage", "Fúria Insondável"),
    ("skilldesc.going-big", "Armas grandes causam dano extra"),
    ("skilldesc.steady-bloodflow", "Lançar magias com vida regenera mana"),
    ("skilldesc.wrecking-it", "Magias de Lâmina/Físicas fortalecem o Dano Verdadeiro do próximo ataque"),
    ("skilldesc.berserker", "Abaixo de 66% de vida concede dano extra"),
    ("skilldesc.overwhelming-force", "Ataques com armas grandes podem lançar uma magia em área"),
    ("skilldesc.magic-blade", "Remove penalidades de armas grandes; ganha 10% de roubo de mana"),
    ("skilldesc.unfathomable-rage", "Converte cada 2 de dano recebido em 1 de mana; dobra o custo"),
    ("skilleffect.going-big", "20% de dano extra no nível máximo"),
    ("skilleffect.steady-bloodflow", "+12 de mana no nível máximo"),
    ("skilleffect.wrecking-it", "+14 de dano no nível máximo"),
    ("skilleffect.berserker", "+13 de dano no nível máximo"),
    ("skilleffect.overwhelming-force", "Efeito constante"),
    ("skilleffect.magic-blade", "Efeito constante"),
    ("skilleffect.unfathomable-rage", "Efeito constante"),
    ("feedback.noPoints", "Sem pontos disponíveis"),
    ("feedback.prereqUnmet", "Requisitos não atendidos"),
    ("feedback.alreadyMax", "Já está no nível máximo"),
    ("feedback.downgradeBlocked", "Necessário para {}"),
    ("feedback.notAllocated", "Nada para remover"),
    ("feedback.invalidLevel", "O nível deve estar entre 1 e 100"),
    ("feedback.statLocked", "Este atributo não pode ser editado"),
    ("feedback.statCapped", "No máximo {} ponto(s) por atributo neste nível"),
    ("feedback.treeReset", "Árvore reiniciada"),
    ("feedback.statsReset", "Atributos reiniciados"),
    ("feedback.soundOn", "Som ligado"),
    ("feedback.soundOff", "Som desligado"),
    ("feedback.language", "Idioma: Português"),
    ("confirm.levelTitle", "Diminuir nível?"),
    ("confirm.levelBody", "{} ponto(s) acima do orçamento. Reiniciar e aplicar?"),
    ("confirm.resetTitle", "Reiniciar árvore?"),
    ("confirm.resetBody", "Devolver todos os pontos desta árvore?"),
    ("confirm.hint", "[y] Sim   [n] Não"),
    ("help.classes", "←/→ escolher  Enter selecionar  g idioma  m som  q sair"),
    ("help.stats", "↑/↓ atributo  +/- pontos  [/] nível  ←/→ classe  r reiniciar  t talentos  q voltar"),
    ("help.traits", "Tab talento  Espaço melhorar  - reduzir  ←/→ árvore  1-0 árvore  [/] nível  Esc fechar  ^R reiniciar  q voltar"),
];
