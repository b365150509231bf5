use std::collections::HashMap;

use actix_web::dev::{Server, ServerHandle};
use api_gateway::config::GatewayConfig;
use cucumber::World;
use log::*;
use msg_common::{Secret, TrustConfig};
use msg_engine::{
    events::EventProducers,
    test_utils::prepare_env::{create_database, drop_database, random_db_path, run_migrations},
    SqliteDatabase,
};
use passport_server::config::{AuthConfig, PassportConfig};
use posts_server::config::PostsConfig;
use reqwest::{Client, Method, RequestBuilder, StatusCode};

#[derive(Debug, World)]
pub struct MsgWorld {
    pub passport: PassportConfig,
    pub posts: PostsConfig,
    pub gateway: GatewayConfig,
    pub server_handles: Vec<ServerHandle>,
    /// Bearer credentials, by user name
    pub tokens: HashMap<String, String>,
    /// Post ids, by title
    pub post_ids: HashMap<String, String>,
    pub response: Option<(StatusCode, String)>,
}

fn random_port() -> u16 {
    20000 + rand::random::<u16>() % 10_000
}

impl Default for MsgWorld {
    fn default() -> Self {
        let _ = env_logger::try_init().ok();
        let passport = PassportConfig {
            host: "127.0.0.1".into(),
            port: random_port(),
            database_url: random_db_path(),
            auth: AuthConfig::new(
                Secret::new(format!("e2e-{}", rand::random::<u64>())),
                chrono::Duration::hours(1),
            ),
            ..Default::default()
        };
        let posts = PostsConfig {
            host: "127.0.0.1".into(),
            port: random_port(),
            database_url: random_db_path(),
            trust: TrustConfig::default(),
            db_retry: passport.db_retry,
        };
        let gateway = GatewayConfig {
            host: "127.0.0.1".into(),
            port: random_port(),
            passport_url: format!("http://127.0.0.1:{}", passport.port),
            posts_rpc_url: format!("http://127.0.0.1:{}", posts.port),
            ..Default::default()
        };
        Self {
            passport,
            posts,
            gateway,
            server_handles: Vec::new(),
            tokens: HashMap::new(),
            post_ids: HashMap::new(),
            response: None,
        }
    }
}

impl MsgWorld {
    /// Every service checks signed assertions, and the gateway signs them.
    pub fn share_internal_secret(&mut self, secret: &str) {
        let trust = TrustConfig::new(Some(Secret::new(secret.to_string())));
        self.passport.trust = trust.clone();
        self.posts.trust = trust.clone();
        self.gateway.trust = trust;
    }

    pub async fn start_platform(&mut self) {
        let passport_db = open_database(&self.passport.database_url).await;
        let posts_db = open_database(&self.posts.database_url).await;
        let passport = passport_server::server::create_server_instance(
            self.passport.clone(),
            passport_db,
            EventProducers::default(),
        )
        .expect("Error creating passport server");
        self.spawn("passport", passport);
        let posts = posts_server::server::create_server_instance(self.posts.clone(), posts_db)
            .expect("Error creating posts server");
        self.spawn("posts", posts);
        let gateway =
            api_gateway::server::create_server_instance(self.gateway.clone()).expect("Error creating gateway");
        self.spawn("gateway", gateway);
        info!("🌍️ Platform started. Gateway on port {}", self.gateway.port);
    }

    fn spawn(&mut self, name: &'static str, srv: Server) {
        self.server_handles.push(srv.handle());
        tokio::spawn(async move {
            match srv.await {
                Ok(_) => info!("🌍️ {name} shut down"),
                Err(e) => warn!("🌍️ {name} error: {e}"),
            }
        });
    }

    pub async fn stop_platform(&mut self) {
        for handle in self.server_handles.drain(..) {
            handle.stop(true).await;
        }
        drop_database(&self.passport.database_url).await;
        drop_database(&self.posts.database_url).await;
        info!("🌍️ Platform stopped");
    }

    pub fn token(&self, user: &str) -> Option<&String> {
        self.tokens.get(user)
    }

    /// Replaces every `<Title>` in the path with the id of the post with that title.
    pub fn resolve_path(&self, path: &str) -> String {
        let mut path = path.to_string();
        for (title, id) in &self.post_ids {
            path = path.replace(&format!("<{title}>"), id);
        }
        path
    }

    /// Sends a request to the gateway on behalf of `user`. Users without a credential are sent anonymously.
    pub async fn request<F>(&self, user: &str, method: Method, path: &str, req: F) -> (StatusCode, String)
    where F: FnOnce(RequestBuilder) -> RequestBuilder {
        let url = format!("http://{}:{}{}", self.gateway.host, self.gateway.port, self.resolve_path(path));
        debug!("🌍️ {user} queries {method} {url}");
        let client = Client::new();
        let mut request = client.request(method, url);
        if let Some(token) = self.token(user) {
            request = request.bearer_auth(token);
        }
        let request = req(request);
        let res = request.send().await.expect("Error getting response");
        let code = res.status();
        let body = res.text().await.expect("Error parsing response body");
        debug!("🌍️ {code} {body}");
        (code, body)
    }
}

async fn open_database(url: &str) -> SqliteDatabase {
    create_database(url).await;
    run_migrations(url).await;
    SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database")
}
