//! Steps command - list known steps and the fields they require.

use anyhow::Result;
use pipedeck_client::StepName;
use pipedeck_panel::SchemaRegistry;

/// One line per step: name and required fields.
pub fn step_lines(schemas: &SchemaRegistry) -> Vec<String> {
    StepName::known()
        .map(|step| {
            let fields = match schemas.get(&step) {
                Some(schema) if !schema.required().is_empty() => schema.required().join(", "),
                _ => "(no fields)".to_string(),
            };
            format!("{:<14}{}", step.as_str(), fields)
        })
        .collect()
}

/// Run the steps command.
pub fn run() -> Result<()> {
    println!("STEP          REQUIRED FIELDS");
    println!("----          ---------------");
    for line in step_lines(&SchemaRegistry::builtin()) {
        println!("{line}");
    }
    println!();
    println!("Pass fields with: pipedeck run <STEP> -f key=value ...");

    Ok(())
}
