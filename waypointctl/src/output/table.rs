use tabled::{Table, settings::Style};

/// Consistent styling for every table that is printed to the terminal
pub(crate) trait WaypointTable {
    fn styled(&mut self) -> &mut Self;
}

impl WaypointTable for Table {
    fn styled(&mut self) -> &mut Self {
        self.with(Style::psql())
    }
}
