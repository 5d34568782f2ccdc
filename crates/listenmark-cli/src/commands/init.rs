//! The `listenmark init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_once(Path::new("listenmark.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("banks")?;
    write_once(Path::new("banks/example.toml"), EXAMPLE_BANK)?;

    std::fs::create_dir_all("answers")?;
    write_once(Path::new("answers/example.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Run: listenmark validate --bank banks/example.toml");
    println!("  2. Run: listenmark take --bank banks/example.toml");
    println!("  3. Run: listenmark check --bank banks/example.toml --answers answers/example.toml");

    Ok(())
}

fn write_once(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# listenmark configuration

# Question bank to use when --bank is not given. Omit for the built-in
# "Shopping Habits" section.
# bank = "banks/example.toml"

# Output format for show/check: "text" or "json".
format = "text"

# Show accepted answers next to verdicts after checking.
reveal_answers = false
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
title = "Example Listening Section"

[[sections]]
title = "Questions 1-2"
instruction = "Write NO MORE THAN TWO WORDS AND/OR A NUMBER for each answer."
first = 1
last = 2

[[sections]]
title = "Questions 3-5"
instruction = "Mark THREE letters that represent the correct answer."
first = 3
last = 5

[[questions]]
id = "q1"
number = 1
type = "free_text"
prompt = "The library opens at on weekdays."
accepted = ["9 am", "9:00", "nine o'clock"]

[[questions]]
id = "q2"
number = 2
type = "free_text"
prompt = "Members can borrow up to books at a time."
accepted = ["6", "six"]

[[questions]]
id = "q3-5"
number = 3
type = "multi_select_trio"
prompt = "Which THREE services does the library offer?"
options = ["Printing", "Café", "Language classes", "Parking", "Study rooms"]
accepted = ["A", "C", "E"]
"#;

const EXAMPLE_ANSWERS: &str = r#"[answers]
q1 = "9 AM"
q2 = "five"
"q3-5" = ["A", "B", "E"]
"#;
