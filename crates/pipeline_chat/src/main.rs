use std::io;

use pipeline_chat::logging;
use pipeline_chat::runtime::ChatRuntime;
use pipeline_chat::transport::transport_from_env;
use pipeline_tui::config::EnvConfig;
use pipeline_tui::ProcessTerminal;

fn main() -> io::Result<()> {
    logging::init_from_env()?;
    let transport = transport_from_env().map_err(io::Error::other)?;

    let config = EnvConfig::from_env();
    let terminal = ProcessTerminal::with_config(&config);
    let mut runtime = ChatRuntime::start(terminal, transport, &config)?;
    runtime.run();
    let pending = runtime.finish()?;

    if !pending.is_empty() {
        println!("{pending}");
    }
    Ok(())
}
