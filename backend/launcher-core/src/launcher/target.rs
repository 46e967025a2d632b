use crate::config::LauncherConfig;

use log::trace;
use url::Url;

const HTTP_SCHEME: &str = "http";
const MANAGED_HOSTS: [&str; 2] = ["127.0.0.1", "localhost"];

/// Check whether `target_url` names the local backend this launcher starts.
///
/// The target must be plain `http`, name `127.0.0.1` or `localhost`, and use
/// the configured port (explicitly or as the scheme default). Anything else,
/// including a URL that does not parse, belongs to someone else.
///
/// # Arguments
///
/// * `target_url` - Base URL the caller is about to talk to
/// * `config` - Supplies the managed port
pub fn is_managed_target(target_url: &str, config: &LauncherConfig) -> bool {
    let url = match Url::parse(target_url) {
        Ok(url) => url,
        Err(e) => {
            trace!("Target {target_url} is not a valid URL: {e}");
            return false;
        }
    };

    if url.scheme() != HTTP_SCHEME {
        trace!("Target {target_url} uses scheme {}", url.scheme());
        return false;
    }

    let host_matches = url
        .host_str()
        .is_some_and(|host| MANAGED_HOSTS.contains(&host));

    host_matches && url.port_or_known_default() == Some(config.port)
}
