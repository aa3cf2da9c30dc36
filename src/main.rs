// SPDX-License-Identifier: MPL-2.0
use prompt_gallery::app::{self, paths, Flags};
use prompt_gallery::logger;
use prompt_gallery::ui::theming::ThemeMode;
use std::path::PathBuf;

const HELP: &str = "\
Prompt Gallery

USAGE:
  prompt_gallery [OPTIONS]

OPTIONS:
  --data <PATH>         Load prompts from a JSON file instead of the bundled data
  --config-dir <DIR>    Directory holding settings.toml
  --theme <MODE>        light, dark or system (this run only)
  -h, --help            Print this help
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        data_path: args.opt_value_from_str::<_, PathBuf>("--data")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        theme: args.opt_value_from_str::<_, ThemeMode>("--theme")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("ignoring unexpected arguments: {:?}", rest);
    }
    Ok(Some(flags))
}

fn main() -> iced::Result {
    logger::init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    log::info!("starting {} v{}", app::APP_TITLE, env!("CARGO_PKG_VERSION"));
    app::run(flags)
}
