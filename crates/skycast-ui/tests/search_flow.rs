//! End-to-end search flows against mock weather and geocoding servers.

use parking_lot::Mutex;
use skycast_core::{GeocodeConfig, LocationError, WeatherConfig};
use skycast_ui::{DisplayWeather, SearchOrchestrator, UiState, WeatherView};
use skycast_weather::{Coordinates, GeocodeClient, Geolocator, WeatherClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq)]
enum ViewEvent {
    ShowLoading,
    HideLoading,
    ClearError,
    Error(String),
    Weather(Vec<String>),
}

/// View that records every call so tests can assert on the sequence.
#[derive(Default)]
struct RecordingView {
    input: Mutex<String>,
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    fn with_input(input: &str) -> Self {
        Self {
            input: Mutex::new(input.to_string()),
            events: Mutex::default(),
        }
    }

    fn set_input(&self, input: &str) {
        *self.input.lock() = input.to_string();
    }

    fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().clone()
    }

    fn loading_visible(&self) -> bool {
        self.events
            .lock()
            .iter()
            .rev()
            .find_map(|e| match e {
                ViewEvent::ShowLoading => Some(true),
                ViewEvent::HideLoading => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    fn last_error(&self) -> Option<String> {
        self.events.lock().iter().rev().find_map(|e| match e {
            ViewEvent::Error(msg) => Some(msg.clone()),
            _ => None,
        })
    }

    fn last_weather(&self) -> Option<Vec<String>> {
        self.events.lock().iter().rev().find_map(|e| match e {
            ViewEvent::Weather(lines) => Some(lines.clone()),
            _ => None,
        })
    }
}

impl WeatherView for RecordingView {
    fn input_location(&self) -> String {
        self.input.lock().clone()
    }

    fn show_loading(&self) {
        self.events.lock().push(ViewEvent::ShowLoading);
    }

    fn hide_loading(&self) {
        self.events.lock().push(ViewEvent::HideLoading);
    }

    fn display_error(&self, message: &str) {
        self.events.lock().push(ViewEvent::Error(message.to_string()));
    }

    fn clear_error(&self) {
        self.events.lock().push(ViewEvent::ClearError);
    }

    fn update_weather(&self, weather: &DisplayWeather) {
        self.events
            .lock()
            .push(ViewEvent::Weather(weather.lines().to_vec()));
    }
}

/// Geolocator with a canned answer.
struct ScriptedGeolocator {
    available: bool,
    result: Result<Coordinates, LocationError>,
}

impl ScriptedGeolocator {
    fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            available: true,
            result: Ok(Coordinates::new(latitude, longitude)),
        }
    }

    fn failing(error: LocationError) -> Self {
        Self {
            available: true,
            result: Err(error),
        }
    }

    fn unavailable() -> Self {
        Self {
            available: false,
            result: Err(LocationError::PositionUnavailable),
        }
    }
}

impl Geolocator for ScriptedGeolocator {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.result.clone()
    }
}

fn orchestrator<G: Geolocator>(
    server: &MockServer,
    view: RecordingView,
    geolocator: G,
) -> SearchOrchestrator<RecordingView, G> {
    let weather = WeatherClient::new(&WeatherConfig {
        api_key: "test-key".to_string(),
        base_url: format!("{}/timeline", server.uri()),
        timeout_secs: 5,
    })
    .unwrap();
    let geocoder = GeocodeClient::new(
        &GeocodeConfig {
            base_url: server.uri(),
            user_agent: "skycast-test/1.0".to_string(),
            zoom: 10,
        },
        5,
    )
    .unwrap();
    SearchOrchestrator::new(weather, geocoder, geolocator, view)
}

fn paris_payload() -> serde_json::Value {
    serde_json::json!({
        "currentConditions": {
            "temp": 18.3,
            "conditions": "Clear",
            "icon": "clear-day",
            "humidity": 55,
            "windspeed": 10.2,
            "datetimeEpoch": 1700000000
        },
        "resolvedAddress": "Paris, France"
    })
}

fn paris_lines() -> Vec<String> {
    vec![
        "Paris, France".to_string(),
        "18.3°C".to_string(),
        "Clear".to_string(),
        "Humidity: 55%".to_string(),
        "Wind: 10.2 km/h".to_string(),
    ]
}

#[tokio::test]
async fn test_manual_search_renders_weather() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timeline/Paris"))
        .and(query_param("unitGroup", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(
        &server,
        RecordingView::with_input("  Paris "),
        ScriptedGeolocator::unavailable(),
    );

    assert_eq!(orch.search().await, UiState::Success);
    assert_eq!(orch.state(), UiState::Success);

    let view = orch.view();
    assert_eq!(view.last_weather(), Some(paris_lines()));
    assert_eq!(view.last_error(), None);
    assert!(!view.loading_visible());
    assert_eq!(
        view.events(),
        vec![
            ViewEvent::ClearError,
            ViewEvent::ShowLoading,
            ViewEvent::HideLoading,
            ViewEvent::Weather(paris_lines()),
        ]
    );
}

#[tokio::test]
async fn test_empty_input_errors_without_network() {
    let server = MockServer::start().await;

    for input in ["", "   ", "\t\n"] {
        let orch = orchestrator(
            &server,
            RecordingView::with_input(input),
            ScriptedGeolocator::unavailable(),
        );

        assert_eq!(orch.search().await, UiState::Error);
        let view = orch.view();
        assert_eq!(view.last_error().as_deref(), Some("Please enter a location."));
        assert!(!view.events().contains(&ViewEvent::ShowLoading));
    }

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "unexpected requests: {:?}", requests);
}

#[tokio::test]
async fn test_incomplete_payload_is_reported_not_rendered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timeline/Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "resolvedAddress": "Atlantis"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/timeline/Lemuria"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "currentConditions": { "temp": 20.0 }
        })))
        .mount(&server)
        .await;

    for place in ["Atlantis", "Lemuria"] {
        let orch = orchestrator(
            &server,
            RecordingView::with_input(place),
            ScriptedGeolocator::unavailable(),
        );

        assert_eq!(orch.search().await, UiState::Error);
        let view = orch.view();
        assert_eq!(
            view.last_error().as_deref(),
            Some("Failed to get weather: Invalid weather data received from API.")
        );
        assert_eq!(view.last_weather(), None);
        assert!(!view.loading_visible());
    }
}

#[tokio::test]
async fn test_unreachable_provider_reports_network_error() {
    // Nothing listens on port 1.
    let weather = WeatherClient::new(&WeatherConfig {
        api_key: "SECRET-KEY-123".to_string(),
        base_url: "http://127.0.0.1:1/timeline".to_string(),
        timeout_secs: 5,
    })
    .unwrap();
    let geocoder = GeocodeClient::new(&GeocodeConfig::default(), 5).unwrap();
    let orch = SearchOrchestrator::new(
        weather,
        geocoder,
        ScriptedGeolocator::unavailable(),
        RecordingView::with_input("Paris"),
    );

    assert_eq!(orch.search().await, UiState::Error);
    assert_eq!(orch.state(), UiState::Error);

    let view = orch.view();
    let error = view.last_error().unwrap();
    assert!(
        error.starts_with("Failed to get weather: Connection failed: "),
        "{}",
        error
    );
    assert!(!error.contains("SECRET-KEY-123"), "key leaked: {}", error);
    assert!(!error.contains("key="), "url leaked: {}", error);
    assert!(!view.loading_visible());
    assert_eq!(view.last_weather(), None);
    assert_eq!(
        view.events(),
        vec![
            ViewEvent::ClearError,
            ViewEvent::ShowLoading,
            ViewEvent::HideLoading,
            ViewEvent::Error(error.clone()),
        ]
    );
}

#[tokio::test]
async fn test_provider_401_surfaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "message": "Unauthorized" })),
        )
        .mount(&server)
        .await;

    let orch = orchestrator(
        &server,
        RecordingView::with_input("Paris"),
        ScriptedGeolocator::unavailable(),
    );

    assert_eq!(orch.search().await, UiState::Error);
    let error = orch.view().last_error().unwrap();
    assert!(error.starts_with("Failed to get weather: "), "{}", error);
    assert!(error.contains("Unauthorized"), "{}", error);
    assert!(!orch.view().loading_visible());
}

#[tokio::test]
async fn test_startup_without_geolocation_stays_idle() {
    let server = MockServer::start().await;
    let orch = orchestrator(
        &server,
        RecordingView::default(),
        ScriptedGeolocator::unavailable(),
    );

    assert_eq!(orch.start().await, UiState::Idle);
    assert!(orch.view().events().is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_startup_permission_denied() {
    let server = MockServer::start().await;
    let orch = orchestrator(
        &server,
        RecordingView::default(),
        ScriptedGeolocator::failing(LocationError::PermissionDenied),
    );

    assert_eq!(orch.start().await, UiState::Error);
    let view = orch.view();
    assert_eq!(
        view.last_error().as_deref(),
        Some("Location permission denied. Please enter a location manually.")
    );
    assert!(!view.loading_visible());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_startup_other_geolocation_error() {
    let server = MockServer::start().await;
    let orch = orchestrator(
        &server,
        RecordingView::default(),
        ScriptedGeolocator::failing(LocationError::Timeout),
    );

    assert_eq!(orch.start().await, UiState::Error);
    assert_eq!(
        orch.view().last_error().as_deref(),
        Some("Unable to determine your location. Please enter a location manually.")
    );
}

#[tokio::test]
async fn test_startup_uses_geocoded_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "display_name": "Paris, Île-de-France, France"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/timeline/48.8566%2C2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(
        &server,
        RecordingView::default(),
        ScriptedGeolocator::at(48.8566, 2.3522),
    );

    assert_eq!(orch.start().await, UiState::Success);
    let lines = orch.view().last_weather().unwrap();
    assert_eq!(lines[0], "Paris, Île-de-France, France");
    assert_eq!(lines[1], "18.3°C");
}

#[tokio::test]
async fn test_geocode_failure_does_not_block_weather() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/timeline/40.7128%2C-74.006"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(
        &server,
        RecordingView::default(),
        ScriptedGeolocator::at(40.7128, -74.006),
    );

    assert_eq!(orch.start().await, UiState::Success);
    let lines = orch.view().last_weather().unwrap();
    assert_eq!(lines[0], "Location near 40.71, -74.01");
    assert_eq!(orch.view().last_error(), None);
}

#[tokio::test]
async fn test_new_search_clears_previous_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timeline/Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload()))
        .mount(&server)
        .await;

    let orch = orchestrator(
        &server,
        RecordingView::with_input(""),
        ScriptedGeolocator::unavailable(),
    );

    assert_eq!(orch.search().await, UiState::Error);

    orch.view().set_input("Paris");
    assert_eq!(orch.search().await, UiState::Success);

    let events = orch.view().events();
    let error_at = events
        .iter()
        .position(|e| matches!(e, ViewEvent::Error(_)))
        .unwrap();
    let weather_at = events
        .iter()
        .position(|e| matches!(e, ViewEvent::Weather(_)))
        .unwrap();
    assert!(events[error_at..weather_at].contains(&ViewEvent::ClearError));
    assert_eq!(orch.into_view().last_weather(), Some(paris_lines()));
}
