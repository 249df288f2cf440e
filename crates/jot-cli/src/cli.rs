use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "jotdb",
    about = "jotdb — actor-owned JSON key-value store over HTTP",
    version,
)]
pub struct Cli {
    /// Address the HTTP server binds to.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Directory holding the per-family JSON documents.
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Upper bound, in seconds, every store call waits for a reply.
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,

    /// Key family served by the value routes.
    #[arg(long, default_value = "values")]
    pub family: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["jotdb"]).unwrap();
        assert_eq!(cli.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(cli.data_dir, PathBuf::from("./data"));
        assert_eq!(cli.timeout_secs, 5);
        assert_eq!(cli.family, "values");
    }

    #[test]
    fn parse_bind_and_data_dir() {
        let cli = Cli::try_parse_from([
            "jotdb",
            "--bind",
            "0.0.0.0:9000",
            "--data-dir",
            "/var/lib/jotdb",
        ])
        .unwrap();
        assert_eq!(cli.bind, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(cli.data_dir, PathBuf::from("/var/lib/jotdb"));
    }

    #[test]
    fn parse_timeout_and_family() {
        let cli =
            Cli::try_parse_from(["jotdb", "--timeout-secs", "2", "--family", "ram_usage"])
                .unwrap();
        assert_eq!(cli.timeout_secs, 2);
        assert_eq!(cli.family, "ram_usage");
    }

    #[test]
    fn rejects_malformed_bind_address() {
        assert!(Cli::try_parse_from(["jotdb", "--bind", "not-an-addr"]).is_err());
    }
}
