/// Command name and one-line usage, in display order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "help                      Show this overview"),
    ("version", "version                   Show build information"),
    ("summary", "summary                   Print the dashboard summary as JSON"),
    ("compare", "compare [YYYY-MM]         Compare a month with the month before"),
    ("list", "list [n]                  Show the most recent transactions"),
    ("categories", "categories [income|expense] List categories"),
    (
        "add",
        "add <income|expense> <amount> <category> <YYYY-MM-DD> <description>",
    ),
    ("category", "category <income|expense> <name> [color]"),
    ("seed", "seed                      Create the default categories"),
    ("exit", "exit                      Leave the shell"),
];

pub fn overview() -> String {
    let mut text = String::from("Available commands:\n");
    for (_, usage) in COMMANDS {
        text.push_str("  ");
        text.push_str(usage);
        text.push('\n');
    }
    text
}

pub fn usage(command: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, usage)| *usage)
}
