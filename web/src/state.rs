use crate::{config::EnvConfig, template_engine};
use anyhow::{Context, Result};
use axum_template::{RenderHtml, engine::Engine};
use libwaypoint::{
    Database,
    store::{LocationStore, ensure_seeded},
};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use tracing::trace;

type TemplateEngine = Engine<minijinja::Environment<'static>>;

#[derive(Debug)]
pub struct SharedState {
    pub store: Arc<dyn LocationStore>,
    pub tmpl: TemplateEngine,
    pub config: EnvConfig,
    pub datadir: PathBuf,
}

impl SharedState {
    pub async fn new(envname: &str, env: EnvConfig, datadir: PathBuf) -> Result<Self> {
        let tmpl_path = datadir.join("templates");
        let template = template_engine(envname, &tmpl_path);
        trace!("Creating shared app state");
        let db = Database::open(&env.database)
            .await
            .with_context(|| format!("Unable to open database {}", &env.database))?;
        let store: Arc<dyn LocationStore> = Arc::new(db);
        ensure_seeded(store.as_ref())
            .await
            .with_context(|| "Unable to seed the location database")?;
        Ok(Self {
            store,
            tmpl: template,
            config: env,
            datadir,
        })
    }

    #[cfg(test)]
    pub fn test(store: Arc<dyn LocationStore>) -> Self {
        let datadir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let template = template_engine("test", datadir.join("templates"));
        tracing::debug!("Creating test shared app state");
        Self {
            store,
            tmpl: template,
            config: EnvConfig::default(),
            datadir,
        }
    }

    pub fn render_template<K, S>(&self, key: K, data: S) -> RenderHtml<K, TemplateEngine, S>
    where
        K: AsRef<str>,
        S: Serialize,
    {
        RenderHtml(key, self.tmpl.clone(), data)
    }
}

pub type AppState = Arc<SharedState>;
