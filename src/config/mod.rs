mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Routes registered by the server itself.
pub const RESERVED_ROUTES: &[&str] = &["/", "/v1/models"];

const MAX_PRECISION: u32 = 10;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.services.is_empty() {
            return Err(Error::config("at least one service must be configured"));
        }

        let mut names: Vec<&str> = Vec::new();
        let mut routes: Vec<&str> = RESERVED_ROUTES.to_vec();
        for service in &self.services {
            if names.contains(&service.name.as_str()) {
                return Err(Error::config(format!("duplicate service name: {}", service.name)));
            }
            names.push(&service.name);

            for route in [&service.single_route, &service.batch_route] {
                if !route.starts_with('/') {
                    return Err(Error::config(format!(
                        "route '{}' of service {} must start with '/'",
                        route, service.name
                    )));
                }
                if routes.contains(&route.as_str()) {
                    return Err(Error::config(format!("route already in use: {}", route)));
                }
                routes.push(route);
            }

            service.validate()?;
        }

        Ok(())
    }
}

impl ServiceConfig {
    fn validate(&self) -> Result<()> {
        if let Some(column) = self
            .identifier_columns
            .iter()
            .find(|c| self.features.contains(c))
        {
            return Err(Error::config(format!(
                "identifier column {} of service {} is also a feature",
                column, self.name
            )));
        }

        if self.upload_field.is_empty() {
            return Err(Error::config(format!(
                "upload field of service {} must not be empty",
                self.name
            )));
        }

        let output = &self.output;
        if output.field.is_empty() {
            return Err(Error::config(format!(
                "output field of service {} must not be empty",
                self.name
            )));
        }
        match output.kind {
            TaskKind::Regression if output.precision > MAX_PRECISION => {
                Err(Error::config(format!(
                    "precision of service {} must be at most {}",
                    self.name, MAX_PRECISION
                )))
            }
            TaskKind::Classification
                if output.labels.is_empty()
                    || output.batch_labels.as_ref().is_some_and(|l| l.is_empty()) =>
            {
                Err(Error::config(format!(
                    "classification service {} needs a non-empty label table",
                    self.name
                )))
            }
            _ => Ok(()),
        }
    }
}
