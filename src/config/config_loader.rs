use anyhow::Result;

use super::config_model::{Database, DotEnvyConfig, JwtSecret, Progression, Server};

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let progression = Progression {
        points_per_tick: env_or("POINTS_PER_MINUTE", 1),
        points_interval_ms: env_or("POINTS_INTERVAL_MS", 60_000),
        streamer_interval_ms: env_or("STREAMER_INTERVAL_MS", 20_000),
        streamer_points_per_tick: env_or("STREAMER_POINTS_PER_TICK", 1),
        heartbeat_timeout_ms: env_or("HEARTBEAT_TIMEOUT_MS", 30_000),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        progression,
    })
}

pub fn get_jwt_secret() -> Result<JwtSecret> {
    dotenvy::dotenv().ok();

    Ok(JwtSecret {
        secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
    })
}
