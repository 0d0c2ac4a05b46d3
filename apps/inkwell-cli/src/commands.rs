//! One-shot subcommands.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use inkwell_core::domain::TagSet;
use inkwell_core::ports::{Confirm, EditorSurface};
use inkwell_infra::{AutoConfirm, PromptConfirm};

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::edit;
use crate::session::Session;

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let confirm: Arc<dyn Confirm> = if cli.yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(PromptConfirm)
    };

    match cli.command {
        Command::Show { id } => {
            let session = loaded(&config, &id, confirm).await?;
            println!("{}", session.summary());
            println!();
            println!("{}", session.editor.content());
        }
        Command::New { title, file } => {
            let session = Session::open(&config, None, confirm)?;
            session.editor.set_title(&title);
            if let Some(path) = file {
                session.editor.set_content(&read_markdown(&path).await?);
            }
            session.save().await?;
            println!("{}", session.summary());
            println!("{}", session.address.current());
        }
        Command::Save { id, title, file } => {
            let session = loaded(&config, &id, confirm).await?;
            if let Some(title) = title {
                session.editor.set_title(&title);
            }
            if let Some(path) = file {
                session.editor.set_content(&read_markdown(&path).await?);
            }
            session.save().await?;
            println!("{}", session.summary());
        }
        Command::Publish { id } => {
            let session = loaded(&config, &id, confirm).await?;
            session.engine.publish().await?;
            println!("{}", session.summary());
        }
        Command::Retract { id } => {
            let session = loaded(&config, &id, confirm).await?;
            session.engine.retract().await?;
            println!("{}", session.summary());
        }
        Command::Delete { id } => {
            let session = loaded(&config, &id, confirm).await?;
            session.engine.delete().await?;
            println!("Deleted post {}", id);
        }
        Command::Image { id, path } => {
            let session = loaded(&config, &id, confirm).await?;
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .context("image path has no file name")?;

            if !session.editor.content().ends_with('\n') && !session.editor.content().is_empty() {
                session.editor.append("\n");
            }
            let uploaded = session.engine.upload_image(file_name, bytes).await?;
            session.save().await?;
            println!("{}", uploaded);
        }
        Command::Tags { id, tags } => {
            let session = loaded(&config, &id, confirm).await?;
            session.engine.save_tags(&TagSet::from_tags(tags)).await?;
            println!("{}", session.summary());
        }
        Command::Edit { id } => edit::run(&config, id.as_deref(), cli.yes).await?,
    }

    Ok(())
}

async fn loaded(config: &AppConfig, id: &str, confirm: Arc<dyn Confirm>) -> anyhow::Result<Session> {
    let session = Session::open(config, Some(id), confirm)?;
    session
        .load()
        .await
        .with_context(|| format!("loading post {}", id))?;
    Ok(session)
}

async fn read_markdown(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}
