//! The built-in combined world layout: every region and location of the two
//! games, with their access requirements. Requirements reference regions by
//! the ids handed out during construction, so the graph is built in one pass
//! with forward declarations avoided by ordering.

use crate::settings::Config;
use crate::{
    BossSlot, BossType, Game, ItemType, Location, LocationId, MedallionSlot, Region, RegionId,
    Requirement, RewardSlot, CRYSTALS, PENDANTS,
};

use ItemType::*;
use Requirement::{And, Boss, Free, Item, ItemCount, Medallion, Or, Region as InRegion, RewardCount};

/// Incrementally assembles the region/location arenas. Also used directly by
/// scenario tests to build small synthetic worlds.
#[derive(Default)]
pub struct WorldBuilder {
    pub regions: Vec<Region>,
    pub locations: Vec<Location>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&mut self, name: &'static str, game: Game, entrance: Requirement) -> RegionId {
        let id = self.regions.len();
        self.regions.push(Region {
            id,
            name,
            game,
            entrance,
            locations: vec![],
            dungeon_items: vec![],
            reward: None,
            boss: None,
            medallion: None,
        });
        id
    }

    pub fn location(
        &mut self,
        region: RegionId,
        name: &'static str,
        requirement: Requirement,
    ) -> LocationId {
        self.weighted_location(region, name, requirement, 0)
    }

    pub fn weighted_location(
        &mut self,
        region: RegionId,
        name: &'static str,
        requirement: Requirement,
        weight: i32,
    ) -> LocationId {
        let id = self.locations.len();
        self.locations.push(Location {
            id,
            name,
            region_id: region,
            weight,
            requirement,
            deny_junk: false,
        });
        self.regions[region].locations.push(id);
        id
    }

    pub fn dungeon_items(&mut self, region: RegionId, items: &[ItemType]) {
        self.regions[region].dungeon_items = items.to_vec();
    }

    pub fn entrance(&mut self, region: RegionId, entrance: Requirement) {
        self.regions[region].entrance = entrance;
    }

    pub fn reward(&mut self, region: RegionId, requirement: Requirement) {
        self.regions[region].reward = Some(RewardSlot {
            requirement,
            reward: None,
        });
    }

    pub fn fixed_reward(&mut self, region: RegionId, reward: crate::RewardType, requirement: Requirement) {
        self.regions[region].reward = Some(RewardSlot {
            requirement,
            reward: Some(reward),
        });
    }

    pub fn boss(&mut self, region: RegionId, boss: BossType, requirement: Requirement) {
        self.regions[region].boss = Some(BossSlot { boss, requirement });
    }

    pub fn medallion(&mut self, region: RegionId) {
        self.regions[region].medallion = Some(MedallionSlot { medallion: None });
    }

    pub fn into_parts(self) -> (Vec<Region>, Vec<Location>) {
        (self.regions, self.locations)
    }
}

fn all_pendants() -> Requirement {
    RewardCount(PENDANTS.to_vec(), 3)
}

fn crystals(count: u32) -> Requirement {
    RewardCount(CRYSTALS.to_vec(), count)
}

pub fn build(config: &Config) -> (Vec<Region>, Vec<Location>) {
    let mut b = WorldBuilder::new();

    // ----- Zelda overworld and dungeons -----

    let light_world = b.region("Light World", Game::Zelda, Free);
    b.location(light_world, "Link's House", Free);
    b.location(light_world, "Sanctuary", Free);
    b.location(light_world, "Kakariko Well", Free);
    b.location(light_world, "Blind's Hideout", Free);
    b.location(light_world, "Sick Kid", Item(Bottle));
    b.location(light_world, "King Zora", Free);
    b.location(light_world, "Waterfall Fairy", Item(Flippers));
    b.location(light_world, "Library", Item(Boots));
    b.location(
        light_world,
        "Bombos Tablet",
        And(vec![Item(Book), ItemCount(ProgressiveSword, 2)]),
    );
    b.location(light_world, "Master Sword Pedestal", all_pendants());

    let hyrule_castle = b.region("Hyrule Castle", Game::Zelda, Free);
    b.location(hyrule_castle, "Secret Passage", Free);
    b.location(hyrule_castle, "Castle Map Chest", Free);
    b.location(hyrule_castle, "Boomerang Chest", Item(KeyHC));
    b.location(hyrule_castle, "Zelda's Cell", Item(KeyHC));
    b.location(hyrule_castle, "Dark Cross", Item(Lamp));
    b.dungeon_items(hyrule_castle, &[KeyHC]);

    let castle_tower = b.region(
        "Castle Tower",
        Game::Zelda,
        Or(vec![Item(Cape), ItemCount(ProgressiveSword, 2)]),
    );
    b.location(castle_tower, "Castle Tower Foyer", Free);
    b.location(castle_tower, "Castle Tower Dark Maze", Item(Lamp));
    b.fixed_reward(
        castle_tower,
        crate::RewardType::Agahnim,
        And(vec![Item(Lamp), Item(ProgressiveSword)]),
    );

    let eastern_palace = b.region("Eastern Palace", Game::Zelda, Free);
    b.location(eastern_palace, "Cannonball Chest", Free);
    b.location(eastern_palace, "Eastern Compass Chest", Free);
    b.location(eastern_palace, "Eastern Big Chest", Item(BigKeyEP));
    b.location(
        eastern_palace,
        "Armos Knights",
        And(vec![Item(BigKeyEP), Item(Bow), Item(Lamp)]),
    );
    b.dungeon_items(eastern_palace, &[BigKeyEP]);
    b.reward(
        eastern_palace,
        And(vec![Item(BigKeyEP), Item(Bow), Item(Lamp)]),
    );

    let desert_palace = b.region("Desert Palace", Game::Zelda, Item(Book));
    b.location(desert_palace, "Desert Map Chest", Free);
    b.location(desert_palace, "Desert Torch", Item(Boots));
    b.location(desert_palace, "Desert Big Chest", Item(BigKeyDP));
    b.location(desert_palace, "Desert Big Key Chest", Item(KeyDP));
    b.location(
        desert_palace,
        "Lanmolas",
        And(vec![
            Item(KeyDP),
            Item(BigKeyDP),
            Item(ProgressiveGlove),
            Or(vec![Item(FireRod), Item(Lamp)]),
        ]),
    );
    b.dungeon_items(desert_palace, &[KeyDP, BigKeyDP]);
    b.reward(
        desert_palace,
        And(vec![
            Item(KeyDP),
            Item(BigKeyDP),
            Item(ProgressiveGlove),
            Or(vec![Item(FireRod), Item(Lamp)]),
        ]),
    );

    let tower_of_hera = b.region(
        "Tower of Hera",
        Game::Zelda,
        And(vec![
            Or(vec![
                Item(Flute),
                And(vec![Item(ProgressiveGlove), Item(Lamp)]),
            ]),
            Or(vec![Item(Mirror), Item(Hookshot)]),
        ]),
    );
    b.location(tower_of_hera, "Hera Basement Cage", Free);
    b.location(tower_of_hera, "Hera Map Chest", Free);
    b.location(tower_of_hera, "Hera Big Key Chest", Item(KeyTH));
    b.location(tower_of_hera, "Hera Big Chest", Item(BigKeyTH));
    b.location(
        tower_of_hera,
        "Moldorm",
        And(vec![
            Item(BigKeyTH),
            Or(vec![Item(ProgressiveSword), Item(Hammer)]),
        ]),
    );
    b.dungeon_items(tower_of_hera, &[KeyTH, BigKeyTH]);
    b.reward(
        tower_of_hera,
        And(vec![
            Item(BigKeyTH),
            Or(vec![Item(ProgressiveSword), Item(Hammer)]),
        ]),
    );

    let dark_world = b.region(
        "Dark World",
        Game::Zelda,
        And(vec![
            Item(MoonPearl),
            Or(vec![
                Requirement::Reward(crate::RewardType::Agahnim),
                And(vec![Item(Hammer), Item(ProgressiveGlove)]),
                ItemCount(ProgressiveGlove, 2),
            ]),
        ]),
    );
    b.location(dark_world, "Pyramid Ledge", Free);
    b.location(dark_world, "Catfish", Item(ProgressiveGlove));
    b.location(dark_world, "Hype Cave", Free);
    b.location(
        dark_world,
        "Peg World",
        And(vec![Item(Hammer), ItemCount(ProgressiveGlove, 2)]),
    );
    b.location(
        dark_world,
        "Bumper Cave Ledge",
        And(vec![Item(Cape), Item(ProgressiveGlove)]),
    );
    b.location(dark_world, "Digging Game", Free);
    b.location(dark_world, "Stumpy", Free);

    let misery_mire = b.region("Misery Mire", Game::Zelda, Free);
    b.entrance(
        misery_mire,
        Requirement::make_and(vec![
            Medallion(misery_mire),
            Item(ProgressiveSword),
            Item(MoonPearl),
            ItemCount(ProgressiveGlove, 2),
        ]),
    );
    b.location(misery_mire, "Mire Bridge Chest", Free);
    b.location(misery_mire, "Mire Spike Chest", Free);
    b.location(misery_mire, "Mire Map Chest", Item(KeyMM));
    b.location(misery_mire, "Mire Big Chest", Item(BigKeyMM));
    b.location(
        misery_mire,
        "Vitreous",
        And(vec![
            ItemCount(KeyMM, 2),
            Item(BigKeyMM),
            Item(Lamp),
            Item(Somaria),
        ]),
    );
    b.dungeon_items(misery_mire, &[KeyMM, BigKeyMM]);
    b.reward(
        misery_mire,
        And(vec![
            ItemCount(KeyMM, 2),
            Item(BigKeyMM),
            Item(Lamp),
            Item(Somaria),
        ]),
    );
    b.medallion(misery_mire);

    let turtle_rock = b.region("Turtle Rock", Game::Zelda, Free);
    b.entrance(
        turtle_rock,
        Requirement::make_and(vec![
            Medallion(turtle_rock),
            Item(ProgressiveSword),
            Item(MoonPearl),
            Item(Hammer),
            ItemCount(ProgressiveGlove, 2),
            Item(Somaria),
        ]),
    );
    b.location(turtle_rock, "Turtle Compass Chest", Free);
    b.location(turtle_rock, "Roller Room", Item(FireRod));
    b.location(turtle_rock, "Chain Chomps", Item(KeyTR));
    b.location(turtle_rock, "Turtle Big Key Chest", ItemCount(KeyTR, 2));
    b.location(turtle_rock, "Turtle Big Chest", Item(BigKeyTR));
    b.location(
        turtle_rock,
        "Trinexx",
        And(vec![
            Item(BigKeyTR),
            ItemCount(KeyTR, 3),
            Item(FireRod),
            Item(IceRod),
            Item(Lamp),
        ]),
    );
    b.dungeon_items(turtle_rock, &[KeyTR, BigKeyTR]);
    b.reward(
        turtle_rock,
        And(vec![
            Item(BigKeyTR),
            ItemCount(KeyTR, 3),
            Item(FireRod),
            Item(IceRod),
            Item(Lamp),
        ]),
    );
    b.medallion(turtle_rock);

    let ganons_tower = b.region(
        "Ganon's Tower",
        Game::Zelda,
        And(vec![
            InRegion(dark_world),
            crystals(config.tower_crystal_count),
        ]),
    );
    b.weighted_location(ganons_tower, "Bob's Torch", Item(Boots), -5);
    b.weighted_location(
        ganons_tower,
        "DMs Room",
        And(vec![Item(Hammer), Item(Hookshot)]),
        -5,
    );
    b.weighted_location(
        ganons_tower,
        "Firesnake Room",
        And(vec![Item(Hammer), Item(Hookshot), Item(KeyGT)]),
        -5,
    );
    b.weighted_location(
        ganons_tower,
        "Tower Map Chest",
        And(vec![Item(Hammer), Or(vec![Item(Boots), Item(Hookshot)])]),
        -5,
    );
    b.weighted_location(
        ganons_tower,
        "Tower Big Chest",
        And(vec![Item(BigKeyGT), ItemCount(KeyGT, 2)]),
        -5,
    );
    b.weighted_location(
        ganons_tower,
        "Mini Helmasaur Room",
        And(vec![Item(BigKeyGT), Item(Bow), Item(Lamp)]),
        -5,
    );
    b.weighted_location(
        ganons_tower,
        "Moldorm Chest",
        And(vec![
            Item(BigKeyGT),
            ItemCount(KeyGT, 2),
            Item(Bow),
            Item(Lamp),
            Item(Hookshot),
        ]),
        -5,
    );
    b.dungeon_items(ganons_tower, &[KeyGT, BigKeyGT]);

    // ----- Metroid areas -----

    let central_crateria = b.region("Central Crateria", Game::Metroid, Free);
    b.location(central_crateria, "Parlor Missile", Free);
    b.location(central_crateria, "Terminator Room", Free);
    b.location(central_crateria, "Bomb Torizo", Item(Morph));
    b.location(
        central_crateria,
        "Landing Site Power Bomb",
        And(vec![Item(Morph), Or(vec![Item(Bombs), Item(PowerBomb)])]),
    );
    b.location(
        central_crateria,
        "Gauntlet",
        And(vec![
            Item(Morph),
            Or(vec![Item(Bombs), ItemCount(PowerBomb, 2)]),
        ]),
    );
    b.location(
        central_crateria,
        "Crateria Supers",
        And(vec![
            Item(CardCrateriaL1),
            Item(Super),
            Item(SpeedBooster),
        ]),
    );

    let blue_brinstar = b.region("Blue Brinstar", Game::Metroid, Free);
    b.location(blue_brinstar, "Morphing Ball", Free);
    b.location(blue_brinstar, "First Missile", Item(Morph));
    b.location(
        blue_brinstar,
        "Blue Brinstar Energy Tank",
        Or(vec![Item(HiJump), Item(SpaceJump), Item(SpeedBooster)]),
    );
    b.location(
        blue_brinstar,
        "Power Bomb Wall",
        And(vec![Item(Morph), Or(vec![Item(Bombs), Item(PowerBomb)])]),
    );
    b.location(
        blue_brinstar,
        "Billy Mays Room",
        And(vec![Item(Morph), Item(PowerBomb)]),
    );

    let green_brinstar = b.region(
        "Green Brinstar",
        Game::Metroid,
        Or(vec![Item(Super), And(vec![Item(Morph), Item(PowerBomb)])]),
    );
    b.location(green_brinstar, "Early Supers", Item(Morph));
    b.location(
        green_brinstar,
        "Brinstar Reserve Tank",
        And(vec![Item(Morph), Item(SpeedBooster)]),
    );
    b.location(
        green_brinstar,
        "Etecoon Energy Tank",
        And(vec![Item(Morph), Item(PowerBomb)]),
    );
    b.location(
        green_brinstar,
        "Green Brinstar Top",
        And(vec![Item(Super), Or(vec![Item(HiJump), Item(SpaceJump)])]),
    );

    let kraids_lair = b.region(
        "Kraid's Lair",
        Game::Metroid,
        And(vec![
            InRegion(green_brinstar),
            Item(Super),
            Item(Morph),
            Item(CardBrinstarBoss),
        ]),
    );
    b.boss(
        kraids_lair,
        BossType::Kraid,
        Or(vec![Item(Missile), Item(Super)]),
    );
    b.location(kraids_lair, "Warehouse Keyhunter", Item(Missile));
    b.location(kraids_lair, "Warehouse Energy Tank", Boss(BossType::Kraid));
    b.location(kraids_lair, "Varia Suit", Boss(BossType::Kraid));

    let upper_norfair = b.region(
        "Upper Norfair",
        Game::Metroid,
        And(vec![Item(Super), Item(Varia), Item(Morph)]),
    );
    b.location(
        upper_norfair,
        "Ice Beam",
        Or(vec![Item(SpeedBooster), Item(Bombs)]),
    );
    b.location(upper_norfair, "Hi-Jump Boots", Free);
    b.location(
        upper_norfair,
        "Speed Booster",
        Or(vec![Item(HiJump), Item(SpaceJump)]),
    );
    b.location(
        upper_norfair,
        "Wave Beam",
        And(vec![
            Item(CardNorfairL1),
            Or(vec![Item(Grapple), Item(HiJump)]),
        ]),
    );
    b.location(
        upper_norfair,
        "Crocomire Energy Tank",
        And(vec![Item(SpeedBooster), Or(vec![Item(Missile), Item(Super)])]),
    );

    let lower_norfair = b.region(
        "Lower Norfair",
        Game::Metroid,
        And(vec![
            Item(Varia),
            Item(PowerBomb),
            Item(Morph),
            Or(vec![Item(SpaceJump), Item(HiJump)]),
        ]),
    );
    b.boss(
        lower_norfair,
        BossType::Ridley,
        And(vec![
            Item(CardNorfairBoss),
            Or(vec![Item(Charge), ItemCount(Missile, 3)]),
        ]),
    );
    b.location(
        lower_norfair,
        "Golden Torizo",
        And(vec![Item(Super), Or(vec![Item(Charge), Item(ScrewAttack)])]),
    );
    b.location(lower_norfair, "Mickey Mouse Room", Free);
    b.location(lower_norfair, "Fireflea Room", Free);
    b.location(lower_norfair, "Screw Attack", Free);
    b.location(lower_norfair, "Ridley Energy Tank", Boss(BossType::Ridley));

    let wrecked_ship = b.region(
        "Wrecked Ship",
        Game::Metroid,
        And(vec![
            Item(Super),
            Item(Morph),
            Or(vec![Item(Grapple), Item(SpaceJump)]),
        ]),
    );
    b.boss(
        wrecked_ship,
        BossType::Phantoon,
        And(vec![
            Item(CardWreckedShipBoss),
            Or(vec![Item(Charge), ItemCount(Missile, 2)]),
        ]),
    );
    b.location(wrecked_ship, "Wrecked Ship Main Shaft", Free);
    b.location(
        wrecked_ship,
        "Attic Assembly Line",
        Boss(BossType::Phantoon),
    );
    b.location(
        wrecked_ship,
        "Wrecked Ship East Super",
        Boss(BossType::Phantoon),
    );
    b.location(wrecked_ship, "Gravity Suit", Boss(BossType::Phantoon));
    b.location(
        wrecked_ship,
        "Bowling Alley Reserve",
        And(vec![Boss(BossType::Phantoon), Item(Morph)]),
    );

    let outer_maridia = b.region(
        "Outer Maridia",
        Game::Metroid,
        And(vec![Item(Gravity), Item(Morph)]),
    );
    b.location(outer_maridia, "Main Street Missile", Item(SpeedBooster));
    b.location(
        outer_maridia,
        "Mama Turtle Energy Tank",
        Or(vec![Item(Grapple), Item(SpaceJump)]),
    );
    b.location(outer_maridia, "Watering Hole", Item(Super));

    let inner_maridia = b.region(
        "Inner Maridia",
        Game::Metroid,
        And(vec![Item(Gravity), Item(Super), Item(Morph)]),
    );
    b.boss(
        inner_maridia,
        BossType::Draygon,
        And(vec![
            Item(CardMaridiaBoss),
            Item(Gravity),
            Or(vec![Item(Charge), ItemCount(Super, 2)]),
        ]),
    );
    b.location(inner_maridia, "Pseudo Plasma Spark", Free);
    b.location(
        inner_maridia,
        "Shaktool Item",
        And(vec![Item(Grapple), ItemCount(PowerBomb, 2)]),
    );
    b.location(
        inner_maridia,
        "Botwoon Energy Tank",
        Or(vec![Item(SpeedBooster), Item(Grapple)]),
    );
    b.location(inner_maridia, "Space Jump", Boss(BossType::Draygon));
    b.location(
        inner_maridia,
        "Plasma Beam",
        And(vec![
            Boss(BossType::Draygon),
            Or(vec![Item(ScrewAttack), Item(Charge)]),
        ]),
    );

    b.into_parts()
}
