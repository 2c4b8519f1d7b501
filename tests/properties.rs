/// Property tests: world invariants hold under arbitrary player activity
use proptest::prelude::*;

use towermud::core::broadcast::Sink;
use towermud::core::objects::Location;
use towermud::{Game, PendingCommand, SessionId, Transport, WorldData};

#[derive(Debug, Clone)]
enum Step {
    Open(u64),
    Close(u64),
    Line(u64, String),
}

#[derive(Default)]
struct Queue {
    opened: Vec<SessionId>,
    closed: Vec<SessionId>,
    commands: Vec<PendingCommand>,
}

impl Sink for Queue {
    fn send(&mut self, _: SessionId, _: &str) {}
}

impl Transport for Queue {
    fn new_sessions(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.opened)
    }

    fn closed_sessions(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.closed)
    }

    fn pending_commands(&mut self) -> Vec<PendingCommand> {
        std::mem::take(&mut self.commands)
    }
}

fn line() -> impl Strategy<Value = String> {
    let exits = prop::sample::select(vec![
        "outside", "inside", "north", "south", "down", "up", "west", "east", "sideways",
    ]);
    let things = prop::sample::select(vec![
        "key", "bottle of beer", "sofa", "whiteboard", "fishtank", "nothing",
    ]);
    prop_oneof![
        exits.prop_map(|e| format!("go {e}")),
        things.clone().prop_map(|o| format!("take {o}")),
        things.prop_map(|o| format!("drop {o}")),
        Just("look".to_string()),
        Just("inventory".to_string()),
        "[a-z]{0,6}",
    ]
}

fn step() -> impl Strategy<Value = Step> {
    let id = 1u64..=4;
    prop_oneof![
        1 => id.clone().prop_map(Step::Open),
        1 => id.clone().prop_map(Step::Close),
        8 => (id, line()).prop_map(|(id, l)| Step::Line(id, l)),
    ]
}

fn assert_locations_resolve(game: &Game) {
    for object in game.objects().iter() {
        let room = match &object.location {
            Location::Room(room) => Some(room.as_str()),
            Location::Carried(holder) => game.sessions().room_of(*holder),
        };
        let room = room.unwrap_or_else(|| panic!("{} has no room", object.name));
        assert!(game.world().contains(room), "{} is in unknown room {room}", object.name);
    }
}

proptest! {
    #[test]
    fn object_locations_always_resolve(ticks in prop::collection::vec(prop::collection::vec(step(), 0..6), 1..25)) {
        let world = WorldData::builtin().unwrap();
        let mut game = Game::new(&world);
        let mut queue = Queue::default();

        for tick in ticks {
            for step in tick {
                match step {
                    Step::Open(id) => queue.opened.push(SessionId(id)),
                    Step::Close(id) => queue.closed.push(SessionId(id)),
                    Step::Line(id, l) => queue.commands.push(PendingCommand::parse(SessionId(id), &l)),
                }
            }
            game.tick(&mut queue);
            assert_locations_resolve(&game);
        }
    }

    #[test]
    fn take_then_drop_restores_location(moves in prop::collection::vec(prop::sample::select(vec!["outside", "north", "down", "north"]), 0..6)) {
        let world = WorldData::builtin().unwrap();
        let mut game = Game::new(&world);
        let mut queue = Queue::default();
        queue.opened.push(SessionId(1));
        queue.commands.push(PendingCommand::parse(SessionId(1), "walker"));
        for m in &moves {
            queue.commands.push(PendingCommand::parse(SessionId(1), &format!("go {m}")));
        }
        game.tick(&mut queue);

        let room = game.sessions().room_of(SessionId(1)).unwrap().to_string();
        let before: Vec<_> = game.objects().iter().map(|o| o.location.clone()).collect();

        for object in world.objects.iter().filter(|o| o.portable) {
            queue.commands.push(PendingCommand::parse(SessionId(1), &format!("take {}", object.name)));
            queue.commands.push(PendingCommand::parse(SessionId(1), &format!("drop {}", object.name)));
        }
        game.tick(&mut queue);

        let after: Vec<_> = game.objects().iter().map(|o| o.location.clone()).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(game.sessions().room_of(SessionId(1)), Some(room.as_str()));
        prop_assert_eq!(game.sessions().inventory_of(SessionId(1), game.objects()).count(), 0);
    }
}
