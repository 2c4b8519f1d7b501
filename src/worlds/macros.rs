/// Macro to register built-in worlds bundled into the binary
///
/// Usage in worlds/mod.rs:
/// ```ignore
/// register_worlds! {
///     bush_house => {
///         file: "bush_house.json",
///         description: "Seven rooms of Bush House, London"
///     }
/// }
/// ```
#[macro_export]
macro_rules! register_worlds {
    (
        $(
            $id:ident => {
                file: $file:expr,
                description: $desc:expr
            }
        ),* $(,)?
    ) => {
        /// All bundled worlds, in registration order
        pub fn get_all_worlds() -> Vec<WorldEntry> {
            vec![
                $(
                    WorldEntry {
                        id: stringify!($id),
                        description: $desc,
                        source: include_str!($file),
                    }
                ),*
            ]
        }

        /// Look up a bundled world by id
        pub fn get_world(id: &str) -> Option<WorldEntry> {
            get_all_worlds().into_iter().find(|w| w.id == id)
        }
    };
}
