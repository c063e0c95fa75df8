use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

mod apps;
mod config;
mod controllers;
mod docs;
mod error;

use apps::AppRegistry;
use docs::DocumentStore;

pub struct AppState {
    pub store: DocumentStore,
    pub registry: AppRegistry,
}

/// SPA fallback handler - serves index.html for client-side routing
async fn spa_fallback() -> actix_web::Result<NamedFile> {
    // Check both possible locations for the frontend dist
    if std::path::Path::new("./dist/index.html").exists() {
        Ok(NamedFile::open("./dist/index.html")?)
    } else {
        Ok(NamedFile::open("../dist/index.html")?)
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let data_dir = config::data_dir();
    let apps_file = config::apps_file_path();
    let port = config::port();

    log::info!("Blueprint server v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Corpus root: {}", data_dir.display());
    log::info!("App registry: {}", apps_file.display());

    let frontend_dist = config::frontend_dist();
    match &frontend_dist {
        Some(dist) => log::info!("Serving frontend from: {}", dist.display()),
        None => log::info!("No frontend dist found - static file serving disabled"),
    }

    // One shared state for all workers: the registry's writer lock must
    // span the whole process.
    let state = web::Data::new(AppState {
        store: DocumentStore::new(data_dir),
        registry: AppRegistry::new(apps_file),
    });

    log::info!("Starting server on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::knowledge::config)
            .configure(controllers::files::config)
            .configure(controllers::apps::config);

        // Serve static files only if a frontend build exists
        if let Some(dist) = &frontend_dist {
            app = app.service(
                Files::new("/", dist)
                    .index_file("index.html")
                    .default_handler(web::to(spa_fallback)),
            );
        }

        app
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
