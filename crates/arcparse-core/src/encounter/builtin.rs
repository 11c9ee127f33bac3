use super::CmPolicy::{self, HealthBased, Indeterminate, Never};

/// Known encounters: (id, name, location, CM policy).
///
/// Raid wings use their release number as the location; fractals and other
/// content use the in-game area name.
pub(super) const ENCOUNTERS: &[(u16, &str, &str, CmPolicy)] = &[
    // Raid Wing 1
    (0x3C4E, "Vale Guardian", "1", Never),
    (0x3C45, "Gorseval", "1", Never),
    (0x3C0F, "Sabetha", "1", Never),
    // Raid Wing 2
    (0x3EFB, "Slothasor", "2", Never),
    (0x3ED8, "Bandit Trio", "2", Never),
    (0x3F09, "Bandit Trio", "2", Never),
    (0x3EFD, "Bandit Trio", "2", Never),
    (0x3EF3, "Matthias", "2", Never),
    // Raid Wing 3
    (0x3F6B, "Keep Construct", "3", Never),
    (0x3F77, "Twisted Castle", "3", Never),
    (0x3F76, "Xera", "3", Never),
    (0x3F9E, "Xera", "3", Never),
    // Raid Wing 4
    (0x432A, "Cairn", "4", Indeterminate),
    (0x4314, "Mursaat Overseer", "4", HealthBased(25_000_000)),
    (0x4324, "Samarog", "4", HealthBased(35_000_000)),
    (0x4302, "Deimos", "4", HealthBased(40_000_000)),
    // Raid Wing 5
    (0x4D37, "Soulless Horror", "5", Indeterminate),
    (0x4D74, "Rainbow Road", "5", Never),
    (0x4CEB, "Broken King", "5", Never),
    (0x4C50, "Soul Eater", "5", Never),
    (0x4CC3, "Eye of Judgement", "5", Never),
    (0x4D84, "Eye of Fate", "5", Never),
    (0x4BFA, "Dhuum", "5", HealthBased(35_000_000)),
    // Raid Wing 6
    (0xABC6, "Conjured Amalgamate", "6", Indeterminate),
    (0x5271, "Largos Twins", "6", HealthBased(18_000_000)),
    (0x5261, "Largos Twins", "6", HealthBased(18_000_000)),
    (0x51C6, "Qadim", "6", HealthBased(21_000_000)),
    // Raid Wing 7
    (0x55F6, "Cardinal Adina", "7", Indeterminate),
    (0x55CC, "Cardinal Sabir", "7", Indeterminate),
    (0x55F0, "Qadim the Peerless", "7", Indeterminate),
    // Winter Strike Mission
    (0x5355, "Freezie", "Wintersday", Never),
    // Fractal 99 CM
    (0x427D, "MAMA (CM)", "99cm", Never),
    (0x4284, "Siax (CM)", "99cm", Never),
    (0x4234, "Ensolyss (CM)", "99cm", Never),
    // Fractal 100 CM
    (0x44E0, "Skorvald the Shattered (CM)", "100cm", Never),
    (0x461D, "Artsariiv (CM)", "100cm", Never),
    (0x455F, "Arkk (CM)", "100cm", Never),
    // Aquatic Ruins
    (0x2C8A, "Jellyfish Beast", "Aquatic Ruins", Never),
    // Captain Mai Trin Boss
    (0x4263, "Champion Inquest Technician", "Mai Trin Boss", Never),
    (0x2FEA, "Mai Trin", "Mai Trin Boss", Never),
    // Chaos Isles
    (0x40E9, "Brazen Gladiator", "Chaos Isles", Never),
    // Cliffside
    (0x2C20, "Archdiviner", "Cliffside", Never),
    // Molten Boss
    (0x325E, "Molten Effigy", "Molten Boss", Never),
    // Nightmare
    (0x4268, "MAMA", "Nightmare", Never),
    (0x4215, "Siax the Unclean", "Nightmare", Never),
    (0x429B, "Ensolyss", "Nightmare", Never),
    // Shattered Observatory; shares its id with the 100 CM entry above
    (0x44E0, "Skorvald the Shattered", "Shattered Observatory", Never),
    // Snowblind
    (0x2C45, "Svanir Shaman", "Snowblind", Never),
    // Solid Ocean
    (0x2BF6, "The Jade Maw", "Solid Ocean", Never),
    // Swampland
    (0x2C00, "Mossman", "Swampland", Never),
    (0x2C01, "Bloomhunger", "Swampland", Never),
    // Thaumanova Reactor
    (0x3268, "Subject 6", "Thaumanova", Never),
    (0x326A, "Thaumanova Anomaly", "Thaumanova", Never),
    // Underground Facility
    (0x2BE9, "Rabsovich", "Underground Facility", Never),
    (0x2BE8, "Rampaging Ice Elemental", "Underground Facility", Never),
    (0x2BE7, "Dredge Powersuit", "Underground Facility", Never),
    // Urban Battleground
    (0x2C9D, "Siegemaster Dulfy", "Urban Battleground", Never),
    (0x2C90, "Captain Ashym", "Urban Battleground", Never),
    // Volcanic
    (0x2CDC, "Grawl Shaman", "Volcanic", Never),
    (0x2CDD, "Imbued Shaman", "Volcanic", Never),
    // Uncategorized
    (0x2C41, "Uncategorized Champions", "Uncategorized", Never),
    (0x2C44, "Uncategorized Champions", "Uncategorized", Never),
    (0x2C43, "Uncategorized Champions", "Uncategorized", Never),
    (0x2C3A, "Old Tom", "Uncategorized", Never),
    (0x2C3D, "Raving Asura", "Uncategorized", Never),
    (0x2C3C, "Raving Asura", "Uncategorized", Never),
    (0x2C3E, "Raving Asura", "Uncategorized", Never),
    (0x2C3F, "Raving Asura", "Uncategorized", Never),
    // Training Golems
    (0x3F46, "Vital Kitty Golem (10m HP)", "Training Golem", Never),
    (0x3F31, "Average Kitty Golem (4m HP)", "Training Golem", Never),
    (0x3F47, "Standard Kitty Golem (1m HP)", "Training Golem", Never),
    (0x3F29, "Massive Kitty Golem (10m HP)", "Training Golem", Never),
    (0x3F4A, "Massive Kitty Golem (4m HP)", "Training Golem", Never),
    (0x3F32, "Massive Kitty Golem (1m HP)", "Training Golem", Never),
    (0x3F2E, "Tough Kitty Golem", "Training Golem", Never),
    (0x3F30, "Resistant Kitty Golem", "Training Golem", Never),
    (0x4CDC, "Large Kitty Golem (4m HP)", "Training Golem", Never),
    (0x4CBD, "Medium Kitty Golem (4m HP)", "Training Golem", Never),
];
