use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub reconciler: ReconcilerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let reconciler = ReconcilerConfig {
            run_hour: load_run_hour(),
        };
        Ok(Self {
            database,
            reconciler,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct ReconcilerConfig {
    pub run_hour: u32,
}

const DEFAULT_RUN_HOUR: u32 = 2;

fn load_run_hour() -> u32 {
    match std::env::var("RECONCILER_RUN_HOUR") {
        Err(_) => DEFAULT_RUN_HOUR,
        Ok(v) => match v.parse::<u32>() {
            Ok(hour) if hour < 24 => hour,
            _ => {
                tracing::warn!(
                    value = %v,
                    "RECONCILER_RUN_HOUR が 0〜23 の範囲外のため既定値を使用します"
                );
                DEFAULT_RUN_HOUR
            }
        },
    }
}
