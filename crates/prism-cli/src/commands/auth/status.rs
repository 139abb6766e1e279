use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    masked_key: Option<String>,
    source: Option<String>,
    mode: &'static str,
    note: Option<String>,
}

pub fn run(flags: &GlobalFlags, config: &prism_config::PrismConfig) -> anyhow::Result<()> {
    let mode = if config.gateway.is_configured() {
        "gateway"
    } else {
        "direct"
    };

    let status = prism_auth::load().map_or(
        AuthStatusResponse {
            authenticated: false,
            masked_key: None,
            source: None,
            mode,
            note: Some("no API key stored — run `prism auth login`".into()),
        },
        |key| AuthStatusResponse {
            authenticated: true,
            masked_key: Some(prism_auth::mask(&key)),
            source: prism_auth::detect_source(),
            mode,
            note: None,
        },
    );

    output(&status, flags.format)
}
