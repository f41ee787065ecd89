//! Step listing command handler.

use sightline::STEPS;

/// Print the wizard step table.
pub fn print_steps() {
    for (index, step) in STEPS.iter().enumerate() {
        println!("{}. {:<26} {}", index, step.name, step.id);
        println!("   {}", step.description);
    }
}
