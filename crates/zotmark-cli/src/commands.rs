//! Subcommand implementations.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_json::Value;
use zotmark::{
    convert_items, open_uri, ConvertedItem, NoteConverter, Options, SenderAction, UriStyle, Vault, WebhookPayload,
    WriteOutcome, WritePolicy,
};

use crate::settings::ZotmarkConfig;
use crate::CliError;

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path).map_err(|source| CliError::Io {
            context: format!("cannot read {}", path.display()),
            source,
        }),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(|source| CliError::Io {
                context: "cannot read stdin".to_string(),
                source,
            })?;
            Ok(buf)
        }
    }
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    io::stdout().write_all(text.as_bytes()).map_err(|source| CliError::Io {
        context: "cannot write stdout".to_string(),
        source,
    })
}

fn converter(config: &ZotmarkConfig) -> NoteConverter {
    NoteConverter::with_options(Options::from(&config.convert))
}

/// `zotmark convert`
pub fn convert(config: &ZotmarkConfig, input: Option<&Path>, output: Option<&Path>) -> Result<(), CliError> {
    let html = read_input(input)?;
    let markdown = converter(config).convert_note(&html);

    match output {
        Some(path) => fs::write(path, &markdown).map_err(|source| CliError::Io {
            context: format!("cannot write {}", path.display()),
            source,
        }),
        None => write_stdout(&markdown),
    }
}

/// `zotmark batch`
pub fn batch(config: &ZotmarkConfig, payload: &Path, force: bool, json: bool) -> Result<(), CliError> {
    let payload = WebhookPayload::from_json(&read_input(Some(payload))?)?;
    let action = payload.action()?;
    info!("processing {} items for {}", payload.data.len(), action.sender_id());

    match action {
        SenderAction::WriteNotes => write_notes(config, &payload, force, json),
        SenderAction::OpenNotes => open_notes(config, &payload),
    }
}

fn write_notes(config: &ZotmarkConfig, payload: &WebhookPayload, force: bool, json: bool) -> Result<(), CliError> {
    let items = convert_items(&converter(config), &payload.data);

    if json {
        let fields: Vec<Value> = items.values().map(|item| Value::Object(item.template_fields())).collect();
        let rendered = serde_json::to_string_pretty(&fields)?;
        return write_stdout(&format!("{rendered}\n"));
    }

    let vault = config.vault.vault();
    let policy = if force { WritePolicy::Overwrite } else { config.vault.write_policy() };

    let mut failed = 0;
    for item in items.values() {
        let line = match write_item(&vault, item, policy) {
            Ok((outcome, path)) => {
                let status = match outcome {
                    WriteOutcome::Created => "created",
                    WriteOutcome::Overwritten => "overwritten",
                    WriteOutcome::Exists => "skipped (exists)",
                };
                format!("{status}: {}\n", path.display())
            }
            Err(err) => {
                warn!("cannot write note for {}: {err}", item.citekey);
                failed += 1;
                format!("failed: {}: {err}\n", item.citekey)
            }
        };
        write_stdout(&line)?;
    }

    if failed > 0 {
        return Err(CliError::ItemsFailed {
            failed,
            total: items.len(),
        });
    }
    Ok(())
}

fn write_item(vault: &Vault, item: &ConvertedItem, policy: WritePolicy) -> zotmark::Result<(WriteOutcome, PathBuf)> {
    let path = vault.note_path(&item.citekey)?;
    let outcome = vault.write_note(&item.citekey, &item.body(), policy)?;
    Ok((outcome, path))
}

fn open_notes(config: &ZotmarkConfig, payload: &WebhookPayload) -> Result<(), CliError> {
    let vault = config.vault.vault();
    let name = vault_name(config)?;
    let style = config.vault.uri_style;

    let mut failed = 0;
    let citekeys: Vec<&str> = payload.data.iter().filter_map(|item| item.citekey.as_deref()).collect();
    for &citekey in &citekeys {
        let line = match open_item(&vault, citekey, &name, style) {
            Ok(line) => line,
            Err(err) => {
                warn!("cannot open note for {citekey}: {err}");
                failed += 1;
                format!("failed: {citekey}: {err}")
            }
        };
        write_stdout(&format!("{line}\n"))?;
    }

    if failed > 0 {
        return Err(CliError::ItemsFailed {
            failed,
            total: citekeys.len(),
        });
    }
    Ok(())
}

fn open_item(vault: &Vault, citekey: &str, name: &str, style: UriStyle) -> zotmark::Result<String> {
    let in_vault = vault.note_path_in_vault(citekey)?;
    if vault.note_exists(citekey)? {
        Ok(open_uri(name, &in_vault, style))
    } else {
        Ok(format!("skipped (missing): {in_vault}"))
    }
}

fn vault_name(config: &ZotmarkConfig) -> Result<String, CliError> {
    config
        .vault
        .vault_name()
        .ok_or_else(|| CliError::Usage("Obsidian vault name is not configured".to_string()))
}

/// `zotmark uri`
pub fn uri(config: &ZotmarkConfig, citekey: &str, advanced: bool) -> Result<(), CliError> {
    let vault = config.vault.vault();
    let style = if advanced { UriStyle::Advanced } else { config.vault.uri_style };
    let in_vault = vault.note_path_in_vault(citekey)?;
    write_stdout(&format!("{}\n", open_uri(&vault_name(config)?, &in_vault, style)))
}
