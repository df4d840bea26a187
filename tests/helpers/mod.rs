#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use foodgram::config::{
    Config, DatabaseConfig, JwtConfig, ObservabilityConfig, PaginationConfig, ServerConfig,
};
use foodgram_recipe::catalog::{IngredientInput, TagInput};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://testserver";
pub const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

pub struct TestApp {
    pub router: Router,
    pub state: foodgram_shared::State,
    _dir: TempDir,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub struct Catalog {
    pub tags: Vec<i64>,
    /// flour/g, flour/cup, sugar/g, egg/pcs
    pub ingredients: Vec<i64>,
}

pub fn test_config(database_url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            base_url: BASE_URL.to_owned(),
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            expiration_days: 30,
        },
        pagination: PaginationConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let url = format!("sqlite:{}", dir.child("db.sqlite3").display());
        let config = test_config(url);

        let pool = foodgram::db::create_pool(&config.database.url, 1).await?;
        foodgram_db::migrate(&pool).await?;

        let state = foodgram_shared::State::single(pool);
        let router = foodgram::router(foodgram::AppState::new(config, state.clone()));

        Ok(Self {
            router,
            state,
            _dir: dir,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<Response> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await?.to_bytes();

        Ok(Response {
            status,
            headers,
            body,
        })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> anyhow::Result<Response> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<Response> {
        self.request(Method::POST, uri, token, body).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> anyhow::Result<Response> {
        self.request(Method::DELETE, uri, token, None).await
    }

    pub async fn register(&self, name: &str) -> anyhow::Result<i64> {
        let response = self
            .post(
                "/api/users/",
                None,
                Some(json!({
                    "email": format!("{name}@foodgram.localhost"),
                    "username": name,
                    "first_name": "John",
                    "last_name": "Doe",
                    "password": "my_password",
                })),
            )
            .await?;

        anyhow::ensure!(
            response.status == StatusCode::CREATED,
            "register failed: {}",
            response.text()
        );

        response.json()["id"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("missing id"))
    }

    pub async fn login(&self, name: &str) -> anyhow::Result<String> {
        let response = self
            .post(
                "/api/auth/token/login/",
                None,
                Some(json!({
                    "email": format!("{name}@foodgram.localhost"),
                    "password": "my_password",
                })),
            )
            .await?;

        anyhow::ensure!(
            response.status == StatusCode::CREATED,
            "login failed: {}",
            response.text()
        );

        response.json()["auth_token"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("missing auth_token"))
    }

    /// Registers and logs in, returning the user id and its token.
    pub async fn user(&self, name: &str) -> anyhow::Result<(i64, String)> {
        let id = self.register(name).await?;
        let token = self.login(name).await?;

        Ok((id, token))
    }

    pub async fn catalog(&self) -> anyhow::Result<Catalog> {
        let cmd = foodgram_recipe::catalog::Command(self.state.clone());

        let mut tags = vec![];
        for (name, color, slug) in [
            ("Breakfast", "#E26C2D", "breakfast"),
            ("Lunch", "#49B64E", "lunch"),
        ] {
            tags.push(
                cmd.create_tag(TagInput {
                    name: name.to_owned(),
                    color: color.to_owned(),
                    slug: slug.to_owned(),
                })
                .await?,
            );
        }

        let inputs = [("flour", "g"), ("flour", "cup"), ("sugar", "g"), ("egg", "pcs")]
            .into_iter()
            .map(|(name, unit)| IngredientInput {
                name: name.to_owned(),
                measurement_unit: unit.to_owned(),
            })
            .collect();
        cmd.import_ingredients(inputs).await?;

        let ingredients = sqlx::query_scalar("SELECT id FROM ingredient ORDER BY id")
            .fetch_all(&self.state.read_db)
            .await?;

        Ok(Catalog { tags, ingredients })
    }

    pub async fn create_recipe(
        &self,
        token: &str,
        name: &str,
        tags: &[i64],
        ingredients: &[(i64, i64)],
    ) -> anyhow::Result<i64> {
        let response = self
            .post("/api/recipes/", Some(token), Some(recipe_body(name, tags, ingredients)))
            .await?;

        anyhow::ensure!(
            response.status == StatusCode::CREATED,
            "create recipe failed: {}",
            response.text()
        );

        response.json()["id"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("missing id"))
    }
}

pub fn recipe_body(name: &str, tags: &[i64], ingredients: &[(i64, i64)]) -> Value {
    json!({
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({ "id": id, "amount": amount }))
            .collect::<Vec<_>>(),
        "tags": tags,
        "image": IMAGE,
        "name": name,
        "text": "Mix everything.",
        "cooking_time": 10,
    })
}
