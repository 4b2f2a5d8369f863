//! HTTP surface: serves the rendered gallery and maps form posts onto UI events.

use actix_web::{http::header, web, App, HttpResponse, HttpServer};

use crate::{
    config::Config,
    gallery::GalleryRuntime,
    genai::Generator,
    ui::{render_page, Key, UiEvent},
};

pub type SharedGallery<G> = web::Data<GalleryRuntime<G>>;

pub fn configure<G: Generator + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index::<G>))
        .route("/api/state", web::get().to(api_state::<G>))
        .route("/regenerate", web::post().to(regenerate::<G>))
        .route("/cards/{index}/activate", web::post().to(activate_card::<G>))
        .route("/cards/{index}/keys/{key}", web::post().to(card_key::<G>))
        .route("/modal/overlay", web::post().to(overlay::<G>))
        .route("/modal/close", web::post().to(close::<G>))
        .route("/keys/{key}", web::post().to(key_pressed::<G>));
}

pub async fn serve<G: Generator + 'static>(
    config: &Config,
    gallery: SharedGallery<G>,
) -> std::io::Result<()> {
    let address = (config.host.clone(), config.port_or_default());
    log::info!("🌐 Listening on http://{}:{}", address.0, address.1);

    HttpServer::new(move || {
        App::new()
            .app_data(gallery.clone())
            .configure(configure::<G>)
    })
    .bind(address)?
    .run()
    .await
}

fn back_to_page() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

async fn index<G: Generator + 'static>(gallery: SharedGallery<G>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&gallery.snapshot()))
}

async fn api_state<G: Generator + 'static>(gallery: SharedGallery<G>) -> HttpResponse {
    HttpResponse::Ok().json(gallery.snapshot())
}

async fn regenerate<G: Generator + 'static>(gallery: SharedGallery<G>) -> HttpResponse {
    gallery.handle(UiEvent::RegenerateClicked);
    back_to_page()
}

async fn activate_card<G: Generator + 'static>(
    gallery: SharedGallery<G>,
    index: web::Path<usize>,
) -> HttpResponse {
    gallery.handle(UiEvent::CardClicked {
        index: index.into_inner(),
    });
    back_to_page()
}

async fn card_key<G: Generator + 'static>(
    gallery: SharedGallery<G>,
    path: web::Path<(usize, String)>,
) -> HttpResponse {
    let (index, key) = path.into_inner();
    gallery.handle(UiEvent::CardKey {
        index,
        key: Key::parse(&key),
    });
    back_to_page()
}

async fn overlay<G: Generator + 'static>(gallery: SharedGallery<G>) -> HttpResponse {
    gallery.handle(UiEvent::OverlayClicked);
    back_to_page()
}

async fn close<G: Generator + 'static>(gallery: SharedGallery<G>) -> HttpResponse {
    gallery.handle(UiEvent::CloseClicked);
    back_to_page()
}

async fn key_pressed<G: Generator + 'static>(
    gallery: SharedGallery<G>,
    key: web::Path<String>,
) -> HttpResponse {
    gallery.handle(UiEvent::KeyPressed(Key::parse(&key)));
    back_to_page()
}
