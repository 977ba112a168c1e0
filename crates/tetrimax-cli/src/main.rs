mod agent;
mod command;
mod scenario;
mod session;
mod summary;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
