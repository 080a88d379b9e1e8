use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{self, AsyncWriteExt, BufReader};
use tracing::info;

use dishcovery::api_connection::BackendApi;
use dishcovery::cli::{parse_args, Command};
use dishcovery::config::AppConfig;
use dishcovery::logging;
use dishcovery::shell;
use dishcovery::storage::FileStore;
use dishcovery::views::{AppContext, Notification, Route, Screen, ViewOutcome};

async fn print_screen(screen: &Screen, notifications: &[Notification]) -> Result<()> {
    let mut stdout = io::stdout();
    stdout
        .write_all(shell::render(screen, notifications).as_bytes())
        .await
        .context("Failed to write to stdout")?;
    stdout.flush().await.context("Failed to flush stdout")?;
    Ok(())
}

/// Applies an action outcome: follows its redirect if any, then prints.
async fn finish(ctx: &AppContext, screen: Screen, outcome: ViewOutcome) -> Result<()> {
    let mut notifications = outcome.notifications;
    let screen = match outcome.redirect {
        Some(route) => {
            let (next, more) = ctx.open(route).await;
            notifications.extend(more);
            next
        }
        None => screen,
    };
    print_screen(&screen, &notifications).await
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = parse_args();
    logging::init(cli.verbose);

    let config = AppConfig::resolve(cli.backend_url, cli.data_dir);
    info!(backend = %config.backend_url, data_dir = %config.data_dir.display(), "starting dishcovery");

    let api = BackendApi::new(&config.backend_url);
    let ctx = AppContext::new(api, Arc::new(FileStore::new(&config.data_dir)));

    match cli.command {
        Command::Status => {
            let message = ctx
                .api
                .health()
                .await
                .with_context(|| format!("Backend at '{}' is not reachable", ctx.api.api_base()))?;
            println!("{}", message);
        }
        Command::Browse => {
            let (screen, notifications) = ctx.open(Route::Catalog).await;
            print_screen(&screen, &notifications).await?;
        }
        Command::Generate { prompt } => {
            let (screen, _) = ctx.open(Route::Catalog).await;
            let Screen::Catalog(mut view) = screen else {
                anyhow::bail!("catalog route opened a different screen");
            };
            view.set_prompt(prompt.join(" "));
            let outcome = view.generate(&ctx).await;
            let failed = outcome.has_error();
            finish(&ctx, Screen::Catalog(view), outcome).await?;
            if failed {
                std::process::exit(1);
            }
        }
        Command::Show { id, toggle_favorite } => {
            let (screen, mut notifications) = ctx.open(Route::Detail(id)).await;
            match screen {
                Screen::Detail(mut view) if toggle_favorite && view.recipe.is_some() => {
                    let mut outcome = view.toggle_favorite(&ctx).await;
                    notifications.append(&mut outcome.notifications);
                    outcome.notifications = notifications;
                    finish(&ctx, Screen::Detail(view), outcome).await?;
                }
                other => print_screen(&other, &notifications).await?,
            }
        }
        Command::Favorites => {
            let (screen, notifications) = ctx.open(Route::Favorites).await;
            print_screen(&screen, &notifications).await?;
        }
        Command::Preferences {
            dietary,
            health,
            save,
        } => {
            let (screen, _) = ctx.open(Route::Preferences).await;
            let Screen::Preferences(mut view) = screen else {
                anyhow::bail!("preferences route opened a different screen");
            };
            let mut outcome = ViewOutcome::none();
            for option in &dietary {
                outcome.notifications.extend(view.toggle_dietary(option).notifications);
            }
            for option in &health {
                outcome.notifications.extend(view.toggle_health(option).notifications);
            }
            if save {
                // Preferences are left untouched when any option was rejected.
                if outcome.has_error() {
                    outcome
                        .notifications
                        .push(Notification::error("Nothing saved"));
                } else {
                    outcome = view.save(&ctx);
                    // Stay on the preferences screen to show what was stored.
                    outcome.redirect = None;
                }
            }
            finish(&ctx, Screen::Preferences(view), outcome).await?;
        }
        Command::Open { path } => {
            let (screen, notifications) = ctx.open(Route::resolve(&path)).await;
            print_screen(&screen, &notifications).await?;
        }
        Command::Shell => {
            let input = BufReader::new(io::stdin());
            shell::run(ctx, Route::Catalog, input, io::stdout())
                .await
                .context("Interactive session failed")?;
        }
    }

    Ok(())
}
