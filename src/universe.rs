//! What the engine knows about things, independent of any one map.


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ThingCategory {
    PlayerStart(u8),
    DeathmatchStart,
    Monster,
    Weapon,
    Item,
}

impl ThingCategory {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ThingCategory::PlayerStart(_) => "player_start",
            ThingCategory::DeathmatchStart => "deathmatch_start",
            ThingCategory::Monster => "monster",
            ThingCategory::Weapon => "weapon",
            ThingCategory::Item => "item",
        }
    }
}

pub struct ThingType {
    pub doomednum: u16,
    pub category: ThingCategory,
    pub zdoom_actor_class: &'static str,
}

macro_rules! thing_types {
    ($($doomednum:expr => ($category:expr, $class:expr),)*) => {
        pub static DOOM_THING_TYPES: &[ThingType] = &[
            $(ThingType{
                doomednum: $doomednum,
                category: $category,
                zdoom_actor_class: $class,
            },)*
        ];
    };
}

thing_types! {
    1 => (ThingCategory::PlayerStart(1), "Player1Start"),
    2 => (ThingCategory::PlayerStart(2), "Player2Start"),
    3 => (ThingCategory::PlayerStart(3), "Player3Start"),
    4 => (ThingCategory::PlayerStart(4), "Player4Start"),
    11 => (ThingCategory::DeathmatchStart, "DeathmatchStart"),
    3004 => (ThingCategory::Monster, "ZombieMan"),
    9 => (ThingCategory::Monster, "ShotgunGuy"),
    3001 => (ThingCategory::Monster, "DoomImp"),
    3002 => (ThingCategory::Monster, "Demon"),
    3005 => (ThingCategory::Monster, "Cacodemon"),
    3003 => (ThingCategory::Monster, "BaronOfHell"),
    16 => (ThingCategory::Monster, "Cyberdemon"),
    7 => (ThingCategory::Monster, "SpiderMastermind"),
    2001 => (ThingCategory::Weapon, "Shotgun"),
    2002 => (ThingCategory::Weapon, "Chaingun"),
    2003 => (ThingCategory::Weapon, "RocketLauncher"),
    2004 => (ThingCategory::Weapon, "PlasmaRifle"),
    2006 => (ThingCategory::Weapon, "BFG9000"),
    2005 => (ThingCategory::Weapon, "Chainsaw"),
    82 => (ThingCategory::Weapon, "SuperShotgun"),
    2011 => (ThingCategory::Item, "Stimpack"),
    2012 => (ThingCategory::Item, "Medikit"),
    2018 => (ThingCategory::Item, "GreenArmor"),
    2019 => (ThingCategory::Item, "BlueArmor"),
    5 => (ThingCategory::Item, "BlueCard"),
    6 => (ThingCategory::Item, "YellowCard"),
    13 => (ThingCategory::Item, "RedCard"),
}

pub fn lookup_thing_type(doomednum: u16) -> Option<&'static ThingType> {
    DOOM_THING_TYPES.iter().find(|thing_type| thing_type.doomednum == doomednum)
}

pub fn is_player_one_start(doomednum: u16) -> bool {
    match lookup_thing_type(doomednum) {
        Some(&ThingType{ category: ThingCategory::PlayerStart(1), .. }) => true,
        _ => false,
    }
}
