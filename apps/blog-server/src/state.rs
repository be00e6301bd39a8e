//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::MailSender;
use blog_core::{BlogService, BlogSettings};
use blog_infra::{ConsoleMailSender, InMemoryBlogStore};

#[cfg(feature = "postgres")]
use blog_infra::database::{
    DatabaseConnections, PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

use crate::config::{AppConfig, MailConfig};
use crate::seed;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
}

#[cfg(feature = "mail-webhook")]
fn build_mailer(config: &MailConfig) -> Arc<dyn MailSender> {
    match &config.webhook_url {
        Some(url) => {
            tracing::info!("Mail relay webhook configured");
            Arc::new(blog_infra::WebhookMailSender::new(url.clone()))
        }
        None => {
            tracing::info!("MAIL_WEBHOOK_URL not set. Mail is written to the log.");
            Arc::new(ConsoleMailSender)
        }
    }
}

#[cfg(not(feature = "mail-webhook"))]
fn build_mailer(config: &MailConfig) -> Arc<dyn MailSender> {
    if config.webhook_url.is_some() {
        tracing::warn!("MAIL_WEBHOOK_URL ignored: built without mail-webhook feature");
    }
    Arc::new(ConsoleMailSender)
}

/// Service over a fresh in-memory store, optionally seeded with demo content.
async fn in_memory_service(
    mailer: Arc<dyn MailSender>,
    settings: BlogSettings,
    seed_demo: bool,
) -> BlogService {
    let store = Arc::new(InMemoryBlogStore::new());
    let blog = BlogService::new(store.clone(), store.clone(), store.clone(), mailer, settings);

    if seed_demo {
        if let Err(e) = seed::seed_demo(store.clone(), &blog).await {
            tracing::error!("Failed to seed demo content: {}", e);
        }
    }

    blog
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let mailer = build_mailer(&config.mail);
        let settings = config.blog_settings();

        #[cfg(feature = "postgres")]
        let blog = {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        let conn = connections.main;
                        let blog = BlogService::new(
                            Arc::new(PostgresPostRepository::new(conn.clone())),
                            Arc::new(PostgresCommentRepository::new(conn.clone())),
                            Arc::new(PostgresTagRepository::new(conn.clone())),
                            mailer,
                            settings,
                        );
                        if config.seed_demo {
                            let users = Arc::new(PostgresUserRepository::new(conn));
                            if let Err(e) = seed::seed_demo(users, &blog).await {
                                tracing::error!("Failed to seed demo content: {}", e);
                            }
                        }
                        blog
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        in_memory_service(mailer, settings, config.seed_demo).await
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory_service(mailer, settings, config.seed_demo).await
            }
        };

        #[cfg(not(feature = "postgres"))]
        let blog = {
            tracing::info!("Running without postgres feature - using in-memory store");
            in_memory_service(mailer, settings, config.seed_demo).await
        };

        tracing::info!("Application state initialized");

        Self::from_service(blog)
    }

    pub fn from_service(blog: BlogService) -> Self {
        Self {
            blog: Arc::new(blog),
        }
    }
}
