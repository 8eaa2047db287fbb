use log::LevelFilter;

use npycompare_cli::cli::build_cli;
use npycompare_cli::compare::run_comparison;

/// Exit status for any failure that prevents the comparison itself.
const EXIT_UNUSABLE_INPUT: i32 = 2;

fn main() {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("COMPARE_NPY_LOG", "warn"))
        .init();

    let matches = build_cli().get_matches();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = match run_comparison(&matches, &mut out) {
        Ok(verdict) => verdict.exit_code(),
        Err(e) => {
            log::error!("Comparison failed: {:#}", e);
            EXIT_UNUSABLE_INPUT
        }
    };
    drop(out);
    std::process::exit(code)
}
