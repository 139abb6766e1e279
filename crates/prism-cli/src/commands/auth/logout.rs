use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    logged_out: bool,
}

pub fn run(flags: &GlobalFlags) -> anyhow::Result<()> {
    prism_auth::delete()?;
    output(&AuthLogoutResponse { logged_out: true }, flags.format)
}
