#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub progression: Progression,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: usize,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

/// Tick cadence and per-tick grants for the background progression loops.
#[derive(Debug, Clone)]
pub struct Progression {
    pub points_per_tick: i64,
    pub points_interval_ms: u64,
    pub streamer_interval_ms: u64,
    pub streamer_points_per_tick: i64,
    pub heartbeat_timeout_ms: i64,
}

#[derive(Debug, Clone)]
pub struct JwtSecret {
    pub secret: String,
}
