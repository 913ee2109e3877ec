//! The built-in story: scenes, art and the cast.

use ex_mechanics::{Archetype, Attribute, Character, MechResult};
use ex_story::{Scene, SceneGraph, SceneId, StoryResult};

pub const INTRO: SceneId = SceneId(1);
pub const CLASS_CHOICE: SceneId = SceneId(2);
pub const FOREST: SceneId = SceneId(3);
pub const WITCH_LAIR: SceneId = SceneId(4);
pub const DRAGON: SceneId = SceneId(5);
pub const ANCESTRAL_POWER: SceneId = SceneId(6);
pub const PEACE: SceneId = SceneId(7);
pub const EPILOGUE: SceneId = SceneId(8);
pub const GAME_OVER: SceneId = SceneId(9);
pub const FAREWELL: SceneId = SceneId(10);
pub const REFUSAL: SceneId = SceneId(11);
pub const LABYRINTH: SceneId = SceneId(35);
pub const STEALTH: SceneId = SceneId(41);
pub const ASSAULT: SceneId = SceneId(42);
pub const PARLEY: SceneId = SceneId(43);
pub const TRUCE: SceneId = SceneId(44);

/// Battle names understood by the battle hook.
pub mod battles {
    pub const FOREST_OGRES: &str = "forest_ogres";
    pub const LABYRINTH: &str = "labyrinth";
    pub const WITCH: &str = "witch";
    pub const WITCH_SURPRISED: &str = "witch_surprised";
    pub const WITCH_PARLEY: &str = "witch_parley";
    pub const DRAGON: &str = "dragon";
}

/// Build the story graph.
pub fn story() -> StoryResult<SceneGraph> {
    let mut graph = SceneGraph::new();

    graph.add_scene(
        Scene::new(
            INTRO,
            "In a faraway kingdom called Exandria, a wicked witch lay sealed inside a rock. \
             After a hundred years the seal weakened and she broke free. She flew to the \
             festival where the kings and queens of every realm celebrated the peace, killed \
             the host king and queen before everyone, and declared war on all kingdoms.\n\
             Their daughter, Princess Fiona, saw it all. You have been summoned to join the \
             army that will hunt the witch down. Do you accept?",
        )
        .with_art("castle")
        .with_choice("Yes, I accept the quest to slay the witch!", CLASS_CHOICE)
        .with_choice("No, go find someone else...", REFUSAL),
    )?;

    graph.add_scene(
        Scene::new(CLASS_CHOICE, "Choose your class:")
            .with_art("knight")
            .with_choice("Knight", FOREST)
            .with_choice("Mage", FOREST),
    )?;

    graph.add_scene(
        Scene::new(
            FOREST,
            "Chapter I: The forest\n\
             At Fiona's castle you find only a handful of recruits: a knight, a mage and a \
             villager. \"The army of ten thousand fell in the first assault,\" the princess \
             says, \"but they left us a map to the witch. I will ride with you.\"\n\
             On the forest road the party comes upon ogres attacking villagers.\n\
             [Mission 01] Defeat the ogres before they kill the villagers. PREPARE FOR BATTLE!",
        )
        .with_art("ogre")
        .with_battle(battles::FOREST_OGRES, LABYRINTH, GAME_OVER),
    )?;

    graph.add_scene(
        Scene::new(
            LABYRINTH,
            "Following the map, the party reaches a labyrinth guarding the witch's lair. \
             Rooms that were never on the map branch off in every direction.",
        )
        .with_art("labyrinth")
        .with_battle(battles::LABYRINTH, WITCH_LAIR, GAME_OVER),
    )?;

    graph.add_scene(
        Scene::new(
            WITCH_LAIR,
            "Chapter II: The witch\n\
             The smell of swamp grows, the air turns damp, and a mist has been thickening \
             for days. At the mouth of a lair a hunched figure performs some kind of ritual. \
             What do you do?",
        )
        .with_art("witch")
        .with_choice("Sneak up on her", STEALTH)
        .with_choice("Attack with everything", ASSAULT)
        .with_choice("Try to talk her out of it", PARLEY),
    )?;

    graph.add_scene(
        Scene::new(
            PARLEY,
            "You lower your weapon and step into the clearing. The witch stops her chant \
             and watches you with narrowed eyes.",
        )
        .with_battle(battles::WITCH_PARLEY, TRUCE, ASSAULT),
    )?;

    graph.add_scene(
        Scene::new(
            TRUCE,
            "Surprisingly, the witch hears you out. She breaks her staff over her knee and \
             abandons her plans. The kingdom is saved without a drop of blood.",
        )
        .with_art("castle")
        .with_choice("Continue", EPILOGUE),
    )?;

    graph.add_scene(
        Scene::new(
            STEALTH,
            "You creep through the mist and strike before the witch finishes her chant!",
        )
        .with_battle(battles::WITCH_SURPRISED, DRAGON, GAME_OVER),
    )?;

    graph.add_scene(
        Scene::new(
            ASSAULT,
            "You charge! The witch turns, cackling, her hands already full of green fire.",
        )
        .with_battle(battles::WITCH, DRAGON, GAME_OVER),
    )?;

    graph.add_scene(
        Scene::new(
            DRAGON,
            "Chapter III: The second form\n\
             The witch falls, but as you stand over her body her skin begins to change. \
             Her eyes yellow, her teeth sharpen, she grows and grows... a dragon!\n\
             [Mission 02] Defeat the dragon!",
        )
        .with_art("dragon")
        .with_battle(battles::DRAGON, PEACE, ANCESTRAL_POWER),
    )?;

    graph.add_scene(
        Scene::new(
            ANCESTRAL_POWER,
            "Seeing the fight turn against you, Princess Fiona awakens an ancestral power and \
             channels all of it into the dragon. The beast thrashes, gurgles, and is finally \
             destroyed.",
        )
        .with_art("magic")
        .with_choice("Continue", PEACE),
    )?;

    graph.add_scene(
        Scene::new(
            PEACE,
            "Congratulations! With the dragon gone, the kingdom knew peace for many years.",
        )
        .with_art("castle")
        .with_choice("Continue", EPILOGUE),
    )?;

    graph.add_scene(
        Scene::new(
            EPILOGUE,
            "But good things never last. Rumors say the witch hid dragon eggs in the forest, \
             and now reports of dragons raiding other kingdoms grow more common every year. \
             We may need your help again, adventurer.\n<<THE END>>",
        )
        .with_choice("Back to the beginning", INTRO),
    )?;

    graph.add_scene(
        Scene::new(GAME_OVER, "You died. Try again?")
            .with_art("gameover")
            .with_choice("Yes", INTRO)
            .with_choice("No", FAREWELL),
    )?;

    graph.add_scene(Scene::new(FAREWELL, "Farewell, adventurer."))?;

    graph.add_scene(Scene::new(
        REFUSAL,
        "You turn your back on the summons. One by one the kingdoms burn.",
    ))?;

    Ok(graph)
}

/// ASCII art for an art reference, if there is any.
pub fn art(name: &str) -> Option<&'static str> {
    let art = match name {
        "castle" => {
            r"
                 |>>>
                 |
       _  _|_  _ |    _  _|_  _
      |;|_|;|_|;|    |;|_|;|_|;|
      \\.    .  /    \\.    .  /
       \\:  .  /      \\:  .  /
        ||:   |        ||:   |
        ||:.  |________||:.  |
        ||:  .|   __   ||:  .|
        ||:   |  |  |  ||:   |
"
        }
        "knight" => {
            r"
          ,   A
         / \, | ,        .--.
        |    =|= >      /.--.\
         \ /` | `       |====|
          `   |         |`::`|
              |     .-;`\..../`;_.-^-._
"
        }
        "ogre" => {
            r"
            ,      ,
           /(.-''-.)\
       |\  \/      \/  /|
       | \ / =.  .= \ / |
       \( \   o\/o   / )/
        \_, '-/  \-' ,_/
          /   \__/   \
          \ \__/\__/ /
"
        }
        "labyrinth" => {
            r"
        +--+--+--+--+--+
        |     |        |
        +  +--+  +--+  +
        |  |     |     |
        +  +  +--+  +--+
        |     |        |
        +--+--+--+--+--+
"
        }
        "witch" => {
            r"
               _,._
           __.'   _)
          <_,)'.-'a\
            /' (    \
    _.-----..,-'   (`'--.
  .'    (  ._     _ `'--'
"
        }
        "dragon" => {
            r"
                __        _
              _/  \    _(\(o
             /     \  /  _  ^^^o
            /   !   \/  ! '!!!v'
           !  !  \ _' ( \____
           ! . \ _!\   \===^\)
"
        }
        "magic" => {
            r"
              *    .  *
           .    \ | /    .
         *   --  (*)  --   *
           .    / | \    .
              *    .  *
"
        }
        "gameover" => {
            r"
           _____
          /     \
         | () () |
          \  ^  /
           |||||
"
        }
        _ => return None,
    };
    Some(art)
}

/// The named character for each archetype.
///
/// Strength is lowered from the default 100 so that a blow, which adds
/// strength to the die, does not end every fight in one round. Life and the
/// archetype's other attributes keep their starting 100.
pub fn champion(archetype: Archetype) -> MechResult<Character> {
    let (name, strength) = match archetype {
        Archetype::Knight => ("Shereik", 22),
        Archetype::Mage => ("Gandalf", 12),
        Archetype::Witch => ("Do71", 16),
        Archetype::Princess => ("Fiona", 14),
        Archetype::Villager => ("Tiago", 10),
        Archetype::Monster => ("Ogre", 12),
        Archetype::Dragon => ("Granamir", 24),
    };
    Character::new(name, archetype).with(Attribute::Strength, strength)
}

/// The party that sets out from Fiona's castle.
pub fn starting_party() -> MechResult<Vec<Character>> {
    [
        Archetype::Knight,
        Archetype::Mage,
        Archetype::Villager,
        Archetype::Princess,
    ]
    .into_iter()
    .map(champion)
    .collect()
}

/// `count` ogres, weaker than a full-life champion.
pub fn ogres(count: u32) -> MechResult<Vec<Character>> {
    (1..=count)
        .map(|n| -> MechResult<Character> {
            let mut ogre = champion(Archetype::Monster)?.with(Attribute::Life, 45)?;
            ogre.name = format!("Ogre {n}");
            Ok(ogre)
        })
        .collect()
}
