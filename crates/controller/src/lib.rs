//! Point-selection controller: tracks the two user-picked points, drives
//! the map overlays and info panel, and runs the calculation exchange
//! against the server.
//!
//! The map widget, the display surface and the HTTP call are seams
//! ([`MapCanvas`], [`InfoPanel`], [`CalculationApi`]) so the controller
//! itself stays a plain state machine.

use std::error;
use std::fmt;

use async_trait::async_trait;
use log::{debug, error};
use model::{CalculationRequest, CalculationResponse, GeoPoint};

pub mod http;

pub use http::HttpCalculationClient;

pub const COORDINATES_PLACEHOLDER: &str = "Não selecionado";
pub const RESULT_PLACEHOLDER: &str = "-";

const DISTANCE_LOADING: &str = "Calculando...";
const POSTAL_LOADING: &str = "Buscando...";

/// Display fields the controller writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoField {
    OriginCoordinates,
    DestinationCoordinates,
    OriginPostal,
    DestinationPostal,
    Distance,
}

/// The display surface: text fields plus a blocking user alert.
pub trait InfoPanel {
    fn set_text(&mut self, field: InfoField, text: &str);
    fn alert(&mut self, message: &str);
}

/// The map widget. Markers and lines are owned through opaque handles so
/// the controller can remove exactly what it created.
pub trait MapCanvas {
    type Marker;
    type Line;

    fn add_marker(&mut self, point: GeoPoint, label: &str) -> Self::Marker;
    fn draw_line(&mut self, from: GeoPoint, to: GeoPoint) -> Self::Line;
    fn remove_marker(&mut self, marker: Self::Marker);
    fn remove_line(&mut self, line: Self::Line);
}

/// One calculation round-trip to the server.
#[async_trait]
pub trait CalculationApi {
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationResponse, CalculationError>;
}

#[derive(Debug, Clone)]
pub enum CalculationError {
    /// Non-2xx transport status.
    Transport { status: u16 },
    /// 2xx response carrying an explicit error field.
    Service(String),
    /// The request could not complete at all.
    Network(String),
}

impl error::Error for CalculationError {}

impl fmt::Display for CalculationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalculationError::Transport { status } => write!(f, "Status: {status}"),
            CalculationError::Service(message) => write!(f, "{message}"),
            CalculationError::Network(message) => write!(f, "{message}"),
        }
    }
}

/// Why a calculation could not even start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// Fewer than two points chosen.
    MissingSelection,
    /// A held point has a bad coordinate. Creation already guarantees
    /// validity, so this is a defensive re-check.
    InvalidCoordinate,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionError::MissingSelection => {
                write!(f, "Por favor, selecione dois pontos no mapa primeiro.")
            }
            SelectionError::InvalidCoordinate => {
                write!(f, "Erro: Coordenadas inválidas.")
            }
        }
    }
}

/// Handle for one started calculation. Carries the request to send and
/// the generation it belongs to; [`Controller::finish_calculation`]
/// discards tickets made stale by a reset or a newer request.
#[derive(Debug, Clone, Copy)]
pub struct CalculationTicket {
    generation: u64,
    request: CalculationRequest,
}

impl CalculationTicket {
    pub fn request(&self) -> CalculationRequest {
        self.request
    }
}

pub struct Controller<M, P, C>
where
    M: MapCanvas,
    P: InfoPanel,
    C: CalculationApi,
{
    map: M,
    panel: P,
    api: C,
    origin: Option<GeoPoint>,
    destination: Option<GeoPoint>,
    origin_marker: Option<M::Marker>,
    destination_marker: Option<M::Marker>,
    line: Option<M::Line>,
    generation: u64,
    pending: bool,
}

impl<M, P, C> Controller<M, P, C>
where
    M: MapCanvas,
    P: InfoPanel,
    C: CalculationApi,
{
    pub fn new(map: M, panel: P, api: C) -> Self {
        Self {
            map,
            panel,
            api,
            origin: None,
            destination: None,
            origin_marker: None,
            destination_marker: None,
            line: None,
            generation: 0,
            pending: false,
        }
    }

    pub fn origin(&self) -> Option<GeoPoint> {
        self.origin
    }

    pub fn destination(&self) -> Option<GeoPoint> {
        self.destination
    }

    /// First click fills the origin, second the destination and the
    /// connecting line. Further clicks are ignored until reset.
    pub fn on_map_click(&mut self, latitude: f64, longitude: f64) {
        let point = GeoPoint::new(latitude, longitude);

        if self.origin.is_none() {
            self.panel
                .set_text(InfoField::OriginCoordinates, &point.display_coordinates());
            self.origin_marker = Some(self.map.add_marker(point, "Origem"));
            self.origin = Some(point);
        } else if self.destination.is_none() {
            self.panel.set_text(
                InfoField::DestinationCoordinates,
                &point.display_coordinates(),
            );
            self.destination_marker = Some(self.map.add_marker(point, "Destino"));
            if let Some(origin) = self.origin {
                self.line = Some(self.map.draw_line(origin, point));
            }
            self.destination = Some(point);
        }
    }

    /// Clears overlays, slots and all display fields. Idempotent; also
    /// invalidates any calculation still in flight.
    pub fn on_reset(&mut self) {
        if let Some(marker) = self.origin_marker.take() {
            self.map.remove_marker(marker);
        }
        if let Some(marker) = self.destination_marker.take() {
            self.map.remove_marker(marker);
        }
        if let Some(line) = self.line.take() {
            self.map.remove_line(line);
        }

        self.origin = None;
        self.destination = None;
        self.generation = self.generation.wrapping_add(1);
        self.pending = false;

        self.panel
            .set_text(InfoField::OriginCoordinates, COORDINATES_PLACEHOLDER);
        self.panel
            .set_text(InfoField::DestinationCoordinates, COORDINATES_PLACEHOLDER);
        self.reset_results();
    }

    /// Validate the selection and mark a calculation as pending. Returns
    /// `None` when the preconditions fail (the user was alerted) or when
    /// a request is already in flight (refused, nothing touched).
    pub fn begin_calculation(&mut self) -> Option<CalculationTicket> {
        if self.pending {
            debug!("Calculation already pending, click refused.");
            return None;
        }

        let request = match self.validate_selection() {
            Ok(request) => request,
            Err(SelectionError::MissingSelection) => {
                self.panel
                    .alert(&SelectionError::MissingSelection.to_string());
                return None;
            }
            Err(SelectionError::InvalidCoordinate) => {
                self.show_loading();
                self.panel
                    .alert(&SelectionError::InvalidCoordinate.to_string());
                self.reset_results();
                return None;
            }
        };

        self.show_loading();
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;

        Some(CalculationTicket {
            generation: self.generation,
            request,
        })
    }

    /// Apply the outcome of a calculation. Stale tickets (reset or a
    /// newer request happened meanwhile) are dropped without touching
    /// the display.
    pub fn finish_calculation(
        &mut self,
        ticket: CalculationTicket,
        outcome: Result<CalculationResponse, CalculationError>,
    ) {
        if ticket.generation != self.generation {
            debug!("Discarding stale calculation response.");
            return;
        }
        self.pending = false;

        match outcome {
            Ok(response) => {
                self.panel.set_text(
                    InfoField::Distance,
                    &format!("{} km", response.distance_km),
                );
                self.panel.set_text(
                    InfoField::OriginPostal,
                    &response.origin_postal.display_text(),
                );
                self.panel.set_text(
                    InfoField::DestinationPostal,
                    &response.destination_postal.display_text(),
                );
            }
            Err(why) => {
                error!("Calculation failed: {why}");
                self.panel.alert(&format!(
                    "Ocorreu um erro ao calcular a distância e obter os CEPs. \
                     Detalhes: {why}"
                ));
                // only the result fields; coordinates and overlays stay
                self.reset_results();
            }
        }
    }

    /// Full calculate action: validate, send, apply.
    pub async fn calculate(&mut self) {
        let Some(ticket) = self.begin_calculation() else {
            return;
        };
        let outcome = self.api.calculate(ticket.request()).await;
        self.finish_calculation(ticket, outcome);
    }

    fn validate_selection(&self) -> Result<CalculationRequest, SelectionError> {
        let (Some(origin), Some(destination)) = (self.origin, self.destination) else {
            return Err(SelectionError::MissingSelection);
        };
        if !origin.is_valid() || !destination.is_valid() {
            return Err(SelectionError::InvalidCoordinate);
        }
        Ok(CalculationRequest::new(origin, destination))
    }

    fn show_loading(&mut self) {
        self.panel.set_text(InfoField::Distance, DISTANCE_LOADING);
        self.panel.set_text(InfoField::OriginPostal, POSTAL_LOADING);
        self.panel
            .set_text(InfoField::DestinationPostal, POSTAL_LOADING);
    }

    fn reset_results(&mut self) {
        self.panel.set_text(InfoField::Distance, RESULT_PLACEHOLDER);
        self.panel
            .set_text(InfoField::OriginPostal, RESULT_PLACEHOLDER);
        self.panel
            .set_text(InfoField::DestinationPostal, RESULT_PLACEHOLDER);
    }
}
