//! Options mode: list the selectable values of one field

use crate::data::Field;
use crate::output::swatch;
use crate::session::Session;

/// Print the sorted distinct values of `field`, one per line
///
/// Products also show their assigned color, so the list doubles as a legend.
pub fn run_list(session: &mut Session, field: Field, quiet: bool) {
    let values = session.dataset().distinct(field);

    if !quiet {
        eprintln!("{} ({} values)", field.title(), values.len());
    }

    if field != Field::Product {
        for value in &values {
            println!("{}", value);
        }
        return;
    }

    let colors = session.product_colors();
    for value in &values {
        let color = colors.get(value).unwrap_or("");
        println!("{} {:<7} {}", swatch(colors.get(value)), color, value);
    }
}
