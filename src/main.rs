use std::env;
use std::path::PathBuf;

const USAGE: &str = "usage: cadenza [DIR]\n       cadenza --print-config\n\n\
type to search; :cd PATH, :up, :recent, :q";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let arg = env::args().nth(1);
    match arg.as_deref() {
        Some("--print-config") => {
            let settings = cadenza::runtime::load_settings();
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        Some("-h" | "--help") => {
            println!("{USAGE}");
            Ok(())
        }
        _ => cadenza::runtime::run(arg.map(PathBuf::from)),
    }
}
