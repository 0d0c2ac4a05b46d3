//! Interactive editing session.
//!
//! Plain lines are appended to the body and autosaved after the quiet period.
//! Lines starting with `:` are commands.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use inkwell_core::ports::{Confirm, EditorSurface};
use inkwell_core::sync::{AutosaveScheduler, CommandBar, TagEditor};
use inkwell_infra::{AutoConfirm, is_yes};

use crate::config::AppConfig;
use crate::session::{Session, render_status};

const HELP: &str = "\
Type to append to the body. Commands:
  :title <text>   set the title
  :save           save now
  :publish        publish
  :retract        retract to draft
  :delete         delete the post and quit
  :image <path>   upload an image at the caret
  :tag <name>     add a tag
  :untag [name]   remove a tag (the last one if no name)
  :show           print the post
  :actions        list available actions
  :help           this text
  :quit           save pending changes and quit";

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Text(String),
    Title(String),
    Save,
    Publish,
    Retract,
    Delete,
    Image(PathBuf),
    Tag(String),
    Untag(Option<String>),
    Show,
    Actions,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return Input::Text(line.to_string());
        };
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command.trim(), ""),
        };

        match (name, arg) {
            ("title", title) => Input::Title(title.to_string()),
            ("save" | "w", _) => Input::Save,
            ("publish", _) => Input::Publish,
            ("retract", _) => Input::Retract,
            ("delete", _) => Input::Delete,
            ("image", path) if !path.is_empty() => Input::Image(PathBuf::from(path)),
            ("tag", tag) if !tag.is_empty() => Input::Tag(tag.to_string()),
            ("untag", "") => Input::Untag(None),
            ("untag", tag) => Input::Untag(Some(tag.to_string())),
            ("show", _) => Input::Show,
            ("actions", _) => Input::Actions,
            ("help" | "h", _) => Input::Help,
            ("quit" | "q", _) => Input::Quit,
            _ => Input::Unknown(line.to_string()),
        }
    }
}

type Lines = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Confirmation read from the session's own input stream.
struct LineConfirm {
    lines: Lines,
}

#[async_trait]
impl Confirm for LineConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        eprintln!("{} [y/N]", prompt);
        match self.lines.lock().await.recv().await {
            Some(answer) => is_yes(&answer),
            None => false,
        }
    }
}

/// Forward stdin lines from a blocking reader thread.
fn spawn_stdin_reader() -> Lines {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Stopped reading input");
                    break;
                }
            }
        }
    });
    Arc::new(Mutex::new(rx))
}

pub async fn run(config: &AppConfig, id: Option<&str>, yes: bool) -> anyhow::Result<()> {
    let lines = spawn_stdin_reader();
    let confirm: Arc<dyn Confirm> = if yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(LineConfirm {
            lines: lines.clone(),
        })
    };

    let session = Session::open(config, id, confirm)?;
    if let Err(e) = session.load().await {
        tracing::warn!(error = %e, "Starting from an empty draft");
    }

    let engine = session.engine.clone();
    let autosave = AutosaveScheduler::new(engine.clone());
    let tags = TagEditor::new(engine.clone());
    let actions = CommandBar::standard(engine.store().subscribe());

    let mut status = engine.status().subscribe();
    let printer = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let line = status.borrow_and_update().clone();
            eprintln!("{}", render_status(&line));
        }
    });

    let mut watcher = CommandBar::standard(engine.store().subscribe());
    let action_printer = tokio::spawn(async move {
        while watcher.changed().await {
            eprintln!("actions: {}", watcher.visible().join(" "));
        }
    });

    eprintln!("{}", session.summary());
    eprintln!("{}", HELP);

    loop {
        let next = lines.lock().await.recv().await;
        let Some(line) = next else {
            break;
        };

        // Failures are already on the status line; the loop keeps going.
        match Input::parse(&line) {
            Input::Text(text) => {
                session.editor.append(&text);
                session.editor.append("\n");
                autosave.on_edit();
            }
            Input::Title(title) => {
                session.editor.set_title(&title);
                autosave.on_edit();
            }
            Input::Save => autosave.flush().await,
            Input::Publish => {
                if let Err(e) = engine.publish().await {
                    tracing::debug!(error = %e, "Publish did not complete");
                }
            }
            Input::Retract => {
                if let Err(e) = engine.retract().await {
                    tracing::debug!(error = %e, "Retract did not complete");
                }
            }
            Input::Delete => {
                autosave.cancel();
                match engine.delete().await {
                    Ok(()) => break,
                    Err(e) => tracing::debug!(error = %e, "Delete did not complete"),
                }
            }
            Input::Image(path) => match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let file_name = path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .unwrap_or("image");
                    match engine.upload_image(file_name, bytes).await {
                        Ok(_) => autosave.on_edit(),
                        Err(e) => tracing::debug!(error = %e, "Image upload did not complete"),
                    }
                }
                Err(e) => eprintln!("cannot read {}: {}", path.display(), e),
            },
            Input::Tag(tag) => {
                tags.add(&tag);
                eprintln!("tags: {}", tags.current());
            }
            Input::Untag(tag) => {
                match tag {
                    Some(tag) => {
                        tags.remove(&tag);
                    }
                    None => {
                        tags.pop_last();
                    }
                }
                eprintln!("tags: {}", tags.current());
            }
            Input::Show => {
                eprintln!("{}", session.summary());
                eprintln!("{}", session.editor.content());
            }
            Input::Actions => eprintln!("actions: {}", actions.visible().join(" ")),
            Input::Help => eprintln!("{}", HELP),
            Input::Quit => break,
            Input::Unknown(line) => eprintln!("unknown command: {}", line),
        }
    }

    if autosave.is_pending() {
        autosave.flush().await;
    }
    if tags.is_pending() {
        tags.flush().await;
    }

    printer.abort();
    action_printer.abort();
    eprintln!("{}", session.summary());
    Ok(())
}
