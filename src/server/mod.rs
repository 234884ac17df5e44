// HTTP surface

mod handlers;

pub use handlers::create_router;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::ConversationService;

pub struct ChatServer {
    service: Arc<ConversationService>,
    bind_address: String,
}

impl ChatServer {
    pub fn new(service: Arc<ConversationService>, bind_address: String) -> Self {
        Self {
            service,
            bind_address,
        }
    }

    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self.bind_address.parse()?;

        // The reference frontends are served cross-origin
        let app = create_router(self.service)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        tracing::info!("Starting keyi chat server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
