//! Commons CLI
//!
//! Drives the community view from a terminal: opens a community on a tab,
//! optionally follows `next` cursors, and prints the resulting view model
//! as text or JSON.
//!
//! ```text
//! commons 42 --tab membres --pages 3
//! commons 42 --about "Réseau des praticiens" --json
//! ```

use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use commons_core::{
    ClientConfig, CommunityContext, CommunityView, CommunityViewModel, FetchState, FetchStatus,
    TabPage,
};

// ── CLI Arguments ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "commons", version, about = "Community detail view from the terminal")]
struct Args {
    /// Community identifier
    community: String,

    /// Tab to open (about, members, discussions, resources or their slugs)
    #[arg(short, long, default_value = "about")]
    tab: String,

    /// Description shown on the about tab
    #[arg(long)]
    about: Option<String>,

    /// Number of pages to show, following `next` cursors
    #[arg(short, long, default_value_t = 1)]
    pages: usize,

    /// Print the view model as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Backend origin, overriding MAIN_DOMAIN
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request deadline in seconds, overriding REQUEST_TIMEOUT_SECS
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// Environment configuration with command-line overrides applied.
fn client_config(args: &Args) -> commons_core::Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &args.base_url {
        config = ClientConfig::new(base_url.as_str())?.with_timeout(config.request_timeout)?;
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs))?;
    }
    Ok(config)
}

// ── Entry Point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "commons=info,commons_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = client_config(&args)?;
    tracing::info!(base_url = %config.base_url, "commons v{}", commons_core::version());

    let view = CommunityView::connect(&config)?;
    let community = match args.about {
        Some(description) => CommunityContext::new(args.community.as_str(), description),
        None => CommunityContext::without_description(args.community.as_str()),
    };

    view.open(community, &args.tab).await?;
    emit(&view.snapshot(), args.json)?;

    for _ in 1..args.pages {
        if !view.snapshot().can_go_next() {
            tracing::info!("no further pages");
            break;
        }
        view.go_next().await?;
        emit(&view.snapshot(), args.json)?;
    }

    if let Some(error) = view.first_error() {
        return Err(eyre!("{error}"));
    }
    Ok(())
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn emit(model: &CommunityViewModel, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(model)?);
    } else {
        print!("{}", render(model));
    }
    Ok(())
}

fn render(model: &CommunityViewModel) -> String {
    let mut out = String::new();
    let community = model
        .community
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_default();
    let tab = model.tab.map(|t| t.label()).unwrap_or("-");
    out.push_str(&format!("== Communauté {community} / {tab} ==\n"));

    match state_line(&model.tab_state) {
        Some(line) => out.push_str(&line),
        None => {
            if let Some(page) = model.tab_state.data() {
                render_page(&mut out, page);
            }
        }
    }

    out.push_str("\n-- Administrateurs --\n");
    match state_line(&model.admins_state) {
        Some(line) => out.push_str(&line),
        None => {
            for member in model.admins_state.data().into_iter().flatten() {
                out.push_str(&format!("  [{}] {}\n", member.role.badge(), member.user.full_name));
            }
        }
    }

    out.push_str("\n-- Activité récente --\n");
    match state_line(&model.activity_state) {
        Some(line) => out.push_str(&line),
        None => {
            for activity in model.activity_state.data().into_iter().flatten() {
                out.push_str(&format!(
                    "  {} {} {}\n",
                    activity.user.display_name(),
                    activity.action,
                    activity.subject().unwrap_or_default()
                ));
            }
        }
    }
    out
}

/// Placeholder line for states without renderable data.
fn state_line<T>(state: &FetchState<T>) -> Option<String> {
    match state.status() {
        FetchStatus::Idle => Some("  (idle)\n".to_string()),
        FetchStatus::Loading => Some("  chargement...\n".to_string()),
        FetchStatus::Error => Some(format!(
            "  erreur: {}\n",
            state.error().map(|e| e.message.as_str()).unwrap_or_default()
        )),
        FetchStatus::Success => None,
    }
}

fn render_page(out: &mut String, page: &TabPage) {
    match page {
        TabPage::About(text) => {
            out.push_str(text);
            out.push('\n');
        }
        TabPage::Members(envelope) => {
            for membership in &envelope.results {
                out.push_str(&format!(
                    "  {:<3} {}\n",
                    membership.user.initials(),
                    membership.user.full_name
                ));
            }
        }
        TabPage::Discussions(envelope) => {
            for discussion in &envelope.results {
                out.push_str(&format!(
                    "  {} ({}, {} commentaires)\n",
                    discussion.titre,
                    discussion.author_display(),
                    discussion.comment_count
                ));
            }
        }
        TabPage::Resources(envelope) => {
            for file in &envelope.results {
                out.push_str(&format!("  {} <{}>\n", file.nom, file.fichier_url));
            }
        }
    }
    if let (Some(count), Some(shown)) = (page.count(), page.len()) {
        out.push_str(&format!("  {shown} / {count}\n"));
    }
}
