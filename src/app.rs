use crate::{
    config::Config,
    error::Result,
    routes::api_routes,
    services::{CatalogClient, RecommendationService},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::net::TcpListener;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for container compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        let catalog_client = web::Data::new(CatalogClient::new(
            &self.config.users_api_url,
            &self.config.songs_api_url,
        ));
        let recommendation_service =
            web::Data::new(RecommendationService::new(self.config.strategy));
        info!("Using the {:?} similarity strategy", self.config.strategy);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(catalog_client.clone())
                .app_data(recommendation_service.clone())
                .service(api_routes())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
