use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use promptstash::catalog::{BrowseState, SortBy, SortDirection};
use promptstash::config::StashConfig;
use promptstash::error::{Result, StashError};
use promptstash::manager::PromptManager;
use promptstash::model::{Prompt, PromptDraft};
use promptstash::service::PromptService;
use promptstash::state::AppState;
use promptstash::store::RecordStore;
use promptstash::store::fs_backend::FsBackend;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

const HOME_ENV: &str = "PROMPTSTASH_HOME";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    manager: PromptManager<FsBackend>,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = data_dir()?;
    let config = StashConfig::load(&data_dir)?;

    let command = match cli.command {
        Some(Commands::Config { key, value }) => {
            return handle_config(&data_dir, config, key, value);
        }
        other => other,
    };

    let ctx = init_context(&data_dir, &config);
    let result = match command {
        Some(Commands::List {
            search,
            tags,
            sort,
            asc,
            desc,
        }) => {
            let browse = browse_state(search, tags, sort.map(Into::into), asc, desc);
            handle_list(&ctx, browse).await
        }
        Some(Commands::View { id }) => handle_view(&ctx, &id).await,
        Some(Commands::Tags) => handle_tags(&ctx).await,
        Some(Commands::Create {
            title,
            content,
            tags,
        }) => handle_create(&ctx, title, content, tags).await,
        Some(Commands::Edit {
            id,
            title,
            content,
            tags,
        }) => handle_edit(&ctx, &id, title, content, tags).await,
        Some(Commands::Delete { id }) => handle_delete(&ctx, &id).await,
        Some(Commands::Duplicate { id }) => handle_duplicate(&ctx, &id).await,
        Some(Commands::Config { .. }) | None => handle_list(&ctx, BrowseState::default()).await,
    };
    ctx.manager.shutdown();
    result
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "promptstash=debug"
    } else {
        "promptstash=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "promptstash", "promptstash")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StashError::Api("Could not determine data directory".into()))
}

fn init_context(data_dir: &Path, config: &StashConfig) -> AppContext {
    let store = RecordStore::new(FsBackend::new(data_dir.to_path_buf()), &config.storage_key);
    let service = PromptService::new(store, config.latency.clone());
    AppContext {
        manager: PromptManager::new(service, &config.editor),
    }
}

fn browse_state(
    search: Option<String>,
    tags: Vec<String>,
    sort: Option<SortBy>,
    asc: bool,
    desc: bool,
) -> BrowseState {
    let mut browse = BrowseState::default();
    if let Some(search) = search {
        browse.update_search(search);
    }
    for tag in &tags {
        browse.toggle_tag(tag);
    }
    if let Some(field) = sort
        && field != browse.sort_by
    {
        browse.toggle_sort(field);
    }
    if asc {
        browse.sort_dir = SortDirection::Asc;
    } else if desc {
        browse.sort_dir = SortDirection::Desc;
    }
    browse
}

/// Exact id, or a prefix matching exactly one prompt.
fn resolve_id(state: &AppState, id: &str) -> Result<String> {
    if state.find(id).is_some() {
        return Ok(id.to_string());
    }
    let matches: Vec<&Prompt> = state
        .prompts
        .iter()
        .filter(|p| p.id.starts_with(id))
        .collect();
    match matches.as_slice() {
        [single] => Ok(single.id.clone()),
        [] => Err(StashError::PromptNotFound(id.to_string())),
        _ => Err(StashError::Api(format!("Ambiguous id prefix: {}", id))),
    }
}

async fn load_and_resolve(ctx: &AppContext, id: &str) -> Result<String> {
    ctx.manager.load_prompts().await?;
    resolve_id(&ctx.manager.state(), id)
}

async fn handle_list(ctx: &AppContext, browse: BrowseState) -> Result<()> {
    ctx.manager.load_prompts().await?;
    print_prompts(&ctx.manager.view(&browse));
    Ok(())
}

async fn handle_view(ctx: &AppContext, id: &str) -> Result<()> {
    let id = load_and_resolve(ctx, id).await?;
    let prompt = ctx.manager.get_prompt(&id).await?;
    print_full_prompt(&prompt);
    Ok(())
}

async fn handle_tags(ctx: &AppContext) -> Result<()> {
    ctx.manager.load_prompts().await?;
    let tags = ctx.manager.all_tags();
    if tags.is_empty() {
        println!("No tags found.");
    }
    for tag in tags {
        println!("{}", tag);
    }
    Ok(())
}

async fn handle_create(
    ctx: &AppContext,
    title: Option<String>,
    content: String,
    tags: Vec<String>,
) -> Result<()> {
    let mut draft = PromptDraft::new().with_content(content).with_tags(tags);
    if let Some(title) = title {
        draft = draft.with_title(title);
    }
    let prompt = ctx.manager.save_prompt(draft).await?;
    println!(
        "{}",
        format!("Created prompt {} ({})", prompt.title, short_id(&prompt.id)).green()
    );
    Ok(())
}

async fn handle_edit(
    ctx: &AppContext,
    id: &str,
    title: Option<String>,
    content: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let id = load_and_resolve(ctx, id).await?;

    if title.is_none() && content.is_none() && tags.is_empty() {
        println!("{}", "Nothing to change.".dimmed());
        return Ok(());
    }

    let mut draft = PromptDraft::new().with_id(&id);
    if let Some(content) = content {
        ctx.manager.edit_prompt(&id);
        ctx.manager.update_editor_content(content.clone());
        ctx.manager.shutdown();
        if let Some(error) = ctx.manager.state().editor.error {
            return Err(StashError::Validation(error));
        }
        draft = draft.with_content(content);
    }
    if let Some(title) = title {
        draft = draft.with_title(title);
    }
    if !tags.is_empty() {
        draft = draft.with_tags(tags);
    }

    let prompt = ctx.manager.save_prompt(draft).await?;
    println!(
        "{}",
        format!("Updated prompt {} ({})", prompt.title, short_id(&prompt.id)).green()
    );
    Ok(())
}

async fn handle_delete(ctx: &AppContext, id: &str) -> Result<()> {
    let id = load_and_resolve(ctx, id).await?;
    ctx.manager.delete_prompt(&id).await?;
    println!("{}", format!("Deleted prompt {}", short_id(&id)).green());
    Ok(())
}

async fn handle_duplicate(ctx: &AppContext, id: &str) -> Result<()> {
    let id = load_and_resolve(ctx, id).await?;
    let copy = ctx.manager.duplicate_prompt(&id).await?;
    println!(
        "{}",
        format!("Created prompt {} ({})", copy.title, short_id(&copy.id)).green()
    );
    Ok(())
}

fn handle_config(
    data_dir: &Path,
    mut config: StashConfig,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in StashConfig::KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, config.get(&key)?),
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(data_dir)?;
            println!("{}", format!("{} = {}", key, config.get(&key)?).green());
        }
    }
    Ok(())
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 8;

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(ID_WIDTH) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

fn print_full_prompt(prompt: &Prompt) {
    println!("{} {}", prompt.id.yellow(), prompt.title.bold());
    if !prompt.tags.is_empty() {
        println!("{}", format_tags(&prompt.tags).cyan());
    }
    println!(
        "{}",
        format!(
            "created {} · updated {}",
            prompt.created_at.format("%Y-%m-%d %H:%M"),
            prompt.updated_at.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    );
    println!("--------------------------------");
    println!("{}", prompt.content);
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_prompts(prompts: &[Prompt]) {
    if prompts.is_empty() {
        println!("No prompts found.");
        return;
    }

    for prompt in prompts {
        let id_str = format!("{:<width$} ", short_id(&prompt.id), width = ID_WIDTH);
        let tags = format_tags(&prompt.tags);
        let tags_width = if tags.is_empty() { 0 } else { tags.width() + 1 };

        let preview: String = prompt
            .content
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title_content = format!("{} {}", prompt.title, preview);

        let fixed_width = 2 + id_str.width() + tags_width + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title_display = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(title_display.width());

        let tags_display = if tags.is_empty() {
            String::new()
        } else {
            format!("{} ", tags)
        };

        println!(
            "  {}{}{}{}{}",
            id_str.yellow(),
            title_display,
            " ".repeat(padding),
            tags_display.cyan(),
            format_time_ago(prompt.updated_at).dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = timeago::Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
