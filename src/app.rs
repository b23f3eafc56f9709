/*
 * Responsibility
 * - CLI 引数 / 環境設定の読み込み → Principal 組み立て → AuthorizationView を JSON で出力
 * - tracing / panic hook の初期化
 * - stdout は JSON 専用 (ログは stderr)
 */
use std::{fs, panic, path::PathBuf, process};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use principal_adapter::{AuthenticatedPrincipal, Principal, SecurityConfig, UserRecord};

/// Build the authenticated principal for a stored user record and print what
/// authorization sees of it.
///
/// - Reads the user record (JSON: id, username, password, roles, good_user, good_admin)
/// - Optionally verifies an OIDC ID token and attaches it (needs OIDC_ISSUER etc.)
/// - Erases credentials unless `--keep-credentials` is given
/// - Prints the authorization view as JSON
#[derive(Parser, Debug)]
#[command(name = "principal-inspect", version, about)]
struct Args {
    /// Path to the user record (JSON)
    #[arg(long, value_name = "FILE")]
    user: PathBuf,

    /// Compact ID token (JWT) to verify and attach to the principal
    #[arg(long)]
    id_token: Option<String>,

    /// Print the view without erasing credentials first
    #[arg(long, default_value_t = false)]
    keep_credentials: bool,
}

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=debug,principal_adapter=debug principal-inspect --user user.json
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default behaviour (stderr).
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = SecurityConfig::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    let raw = fs::read_to_string(&args.user)
        .with_context(|| format!("failed to read user record {}", args.user.display()))?;
    let user: UserRecord =
        serde_json::from_str(&raw).context("user record is not valid JSON")?;

    let mut principal = Principal::with_privileged_roles(user, config.privileged_roles.clone());

    if let Some(token) = args.id_token.as_deref() {
        let verifier = config.id_token_verifier()?.ok_or_else(|| {
            anyhow!("--id-token requires OIDC_ISSUER, OIDC_AUDIENCE and OIDC_PUBLIC_KEY_PEM")
        })?;

        let id_token = match verifier.verify(token) {
            Ok(id_token) => id_token,
            Err(err) => {
                tracing::warn!(error = %err, "id token verification failed");
                return Err(err.into());
            }
        };

        if let Some(name) = id_token.claim_as_str("name").or(id_token.subject()) {
            principal.set_name(name);
        }
        principal.set_claims(id_token.claims().clone())?;
        principal.set_id_token(id_token)?;
    }

    if !args.keep_credentials {
        principal.erase_credentials();
    }

    let view = principal.authorization_view();
    tracing::info!(
        username = %view.username,
        authorities = view.authorities.len(),
        erased = view.erased,
        "principal built"
    );

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
