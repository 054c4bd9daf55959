use controller::{Controller, HttpCalculationClient, InfoField, InfoPanel, MapCanvas};
use model::GeoPoint;

/// Prints field updates instead of writing into a page.
struct ConsolePanel;

impl InfoPanel for ConsolePanel {
    fn set_text(&mut self, field: InfoField, text: &str) {
        println!("{field:?}: {text}");
    }

    fn alert(&mut self, message: &str) {
        println!("[alert] {message}");
    }
}

/// Prints overlay operations instead of drawing on a map.
struct ConsoleMap {
    next_handle: u32,
}

impl MapCanvas for ConsoleMap {
    type Marker = u32;
    type Line = u32;

    fn add_marker(&mut self, point: GeoPoint, label: &str) -> u32 {
        self.next_handle += 1;
        println!(
            "marker #{} '{}' at {}",
            self.next_handle,
            label,
            point.display_coordinates()
        );
        self.next_handle
    }

    fn draw_line(&mut self, from: GeoPoint, to: GeoPoint) -> u32 {
        self.next_handle += 1;
        println!(
            "line #{} from {} to {}",
            self.next_handle,
            from.display_coordinates(),
            to.display_coordinates()
        );
        self.next_handle
    }

    fn remove_marker(&mut self, marker: u32) {
        println!("removed marker #{marker}");
    }

    fn remove_line(&mut self, line: u32) {
        println!("removed line #{line}");
    }
}

#[tokio::main]
async fn main() {
    let api = HttpCalculationClient::new("http://localhost:8080");
    let mut controller =
        Controller::new(ConsoleMap { next_handle: 0 }, ConsolePanel, api);

    // Brasília, then Bragança (PA)
    controller.on_map_click(-15.77972, -47.92972);
    controller.on_map_click(-1.0511, -46.7631);

    controller.calculate().await;
    controller.on_reset();
}
