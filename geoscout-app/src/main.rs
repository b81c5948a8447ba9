use std::sync::Arc;
use std::time::Duration;

use geoscout::{
    core::color::Color,
    prelude::*,
    providers::{FixedGeolocator, MemoryMap, MemoryMarkers, MemoryTraffic},
    NominatimPlaces, OpenMeteoClient,
};

/// Desktop host for the location widget.
///
/// The map itself is the in-memory provider, so the central panel shows the
/// camera state instead of imagery. Search and weather go to the live
/// Nominatim and Open-Meteo services.
///
/// Usage: `geoscout-app [intro | <config.json>]`
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = load_config(std::env::args().nth(1))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("GeoScout"),
        ..Default::default()
    };

    let app = GeoScoutApp::new(config)?;
    eframe::run_native("geoscout-app", options, Box::new(move |_cc| Box::new(app)))?;

    Ok(())
}

fn load_config(arg: Option<String>) -> geoscout::Result<WidgetConfig> {
    match arg.as_deref() {
        None => Ok(WidgetProfile::Continuous.resolve()),
        Some("intro") => Ok(WidgetProfile::Intro.resolve()),
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                MapError::InvalidConfig(format!("cannot read {}: {}", path, e))
            })?;
            WidgetConfig::from_json(&json)
        }
    }
}

const IDLE_REPAINT: Duration = Duration::from_millis(100);

fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r(), color.g(), color.b())
}

struct GeoScoutApp {
    widget: Arc<MapWidget>,
    map: Arc<MemoryMap>,
    query: String,
}

impl GeoScoutApp {
    fn new(config: WidgetConfig) -> geoscout::Result<Self> {
        let map = Arc::new(MemoryMap::new());
        let places = Arc::new(NominatimPlaces::new());
        let providers = Providers {
            map: map.clone(),
            traffic: Arc::new(MemoryTraffic::new()),
            markers: Arc::new(MemoryMarkers::new()),
            autocomplete: places.clone(),
            details: places,
            geolocator: Arc::new(FixedGeolocator::unsupported()),
            weather: Arc::new(OpenMeteoClient::with_base_url(
                config.weather_base_url.clone(),
            )),
        };
        let widget = Arc::new(MapBootstrapper::new(config, providers).bootstrap()?);

        let starting = widget.clone();
        spawn(async move { starting.start().await });

        Ok(Self {
            widget,
            map,
            query: String::new(),
        })
    }

    /// Events that never wait on a provider are applied before the frame is
    /// drawn; the rest run on the runtime.
    fn dispatch(&self, event: WidgetEvent) {
        log::debug!("dispatching {:?}", event);
        if !event.is_async() {
            futures::executor::block_on(self.widget.dispatch(event));
            return;
        }
        let widget = self.widget.clone();
        spawn(async move { widget.dispatch(event).await });
    }

    /// Stands in for a drag or pinch on a real map.
    fn nudge_camera(&self, d_lat: f64, d_lng: f64, d_zoom: f64) {
        let camera = self.map.camera();
        let center = LatLng::new(camera.center.lat + d_lat, camera.center.lng + d_lng);
        self.map
            .move_camera(center, (camera.zoom + d_zoom).clamp(0.0, 21.0));
        self.dispatch(WidgetEvent::CameraIdle);
    }

    fn search_panel(&mut self, ui: &mut egui::Ui, view: &SearchView) {
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.query)
                .hint_text("Search a place…")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.dispatch(WidgetEvent::SearchInput(self.query.clone()));
        }
        if response.gained_focus() {
            self.dispatch(WidgetEvent::SearchFocus(true));
        }
        if response.lost_focus() {
            self.dispatch(WidgetEvent::SearchFocus(false));
        }

        if view.results_visible {
            for (index, candidate) in view.results.iter().enumerate() {
                let label = format!("{}  {}", candidate.primary_label, candidate.secondary_label);
                if ui.selectable_label(false, label).clicked() {
                    self.query = candidate.primary_label.clone();
                    self.dispatch(WidgetEvent::SelectResult(index));
                }
            }
        }
    }

    fn controls_panel(&self, ui: &mut egui::Ui, snapshot: &WidgetSnapshot) {
        ui.heading("Camera");
        ui.horizontal(|ui| {
            if ui.selectable_label(snapshot.traffic_on, "Traffic").clicked() {
                self.dispatch(WidgetEvent::ToggleTraffic);
            }
            let locate = match snapshot.locate_icon {
                LocateIcon::Crosshairs => "Locate",
                LocateIcon::Spinner => "Locating…",
            };
            if ui.button(locate).clicked() {
                self.dispatch(WidgetEvent::Locate);
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Tilt up").clicked() {
                self.dispatch(WidgetEvent::TiltUp);
            }
            if ui.button("Tilt down").clicked() {
                self.dispatch(WidgetEvent::TiltDown);
            }
            if ui.button("Rotate").clicked() {
                self.dispatch(WidgetEvent::Rotate);
            }
        });

        ui.separator();
        ui.label("Move");
        ui.horizontal(|ui| {
            if ui.button("N").clicked() {
                self.nudge_camera(0.01, 0.0, 0.0);
            }
            if ui.button("S").clicked() {
                self.nudge_camera(-0.01, 0.0, 0.0);
            }
            if ui.button("W").clicked() {
                self.nudge_camera(0.0, -0.01, 0.0);
            }
            if ui.button("E").clicked() {
                self.nudge_camera(0.0, 0.01, 0.0);
            }
            if ui.button("+").clicked() {
                self.nudge_camera(0.0, 0.0, 1.0);
            }
            if ui.button("-").clicked() {
                self.nudge_camera(0.0, 0.0, -1.0);
            }
        });

        ui.separator();
        ui.heading("Weather");
        match (&snapshot.weather.temperature, &snapshot.weather.description) {
            (Some(temperature), Some(description)) => {
                ui.label(egui::RichText::new(temperature).size(28.0));
                ui.label(description);
                if let Some(icon) = snapshot.weather.icon {
                    ui.weak(icon.css_class());
                }
            }
            _ => {
                ui.weak("--°C");
            }
        }
    }
}

impl eframe::App for GeoScoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(event) = self.widget.tick() {
            self.dispatch(event);
        }
        let snapshot = self.widget.snapshot();

        let search = egui::TopBottomPanel::top("search_panel").show(ctx, |ui| {
            self.search_panel(ui, &snapshot.search);
        });
        let search_rect = search.response.rect;
        let clicked_at = ctx.input(|i| {
            if i.pointer.any_click() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let Some(pos) = clicked_at {
            if !search_rect.contains(pos) && snapshot.search.results_visible {
                self.dispatch(WidgetEvent::DocumentClick {
                    inside_search: false,
                });
            }
        }

        egui::SidePanel::right("controls_panel")
            .resizable(false)
            .show(ctx, |ui| self.controls_panel(ui, &snapshot));

        egui::CentralPanel::default().show(ctx, |ui| {
            if snapshot.loader != LoaderState::Removed {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }
            let camera = snapshot.camera;
            ui.monospace(format!("center  {}", camera.center));
            ui.monospace(format!("zoom    {:.1}", camera.zoom));
            ui.monospace(format!("tilt    {:.1}", camera.tilt));
            ui.monospace(format!("heading {:.1}", camera.heading));
            if let Some(marker) = snapshot.marker {
                ui.monospace(format!("marker  {}", marker));
            }
            if snapshot.intro_running {
                ui.weak("intro playing…");
            }
        });

        if let Some(toast) = &snapshot.toast {
            egui::Area::new(egui::Id::new("toast"))
                .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(2.0, color32(toast.accent)))
                        .show(ui, |ui| ui.label(&toast.message));
                });
        }

        let wait = self
            .widget
            .next_intro_step_in()
            .map_or(IDLE_REPAINT, |due| due.min(IDLE_REPAINT));
        ctx.request_repaint_after(wait);
    }
}
