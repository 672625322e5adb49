use clap::ValueEnum;

use interpreter::Memory;
use interpreter::instruction::{
    get_variable, increment_variable, log_memory, seq, set_variable, try_catch, while_loop,
};
use procdsl::Either;
use procdsl::render::{self, Renderer};
use procdsl::servers::ServerDirectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Count a variable from 0 to 10 with a while loop
    Counter,
    /// Recover from a missing variable with try/catch
    Recover,
    /// Fetch from every fake server, with and without error reasons
    Servers,
    /// Draw a triangle of asterisks with a threaded text buffer
    Render,
}

/// Run a built-in demo and return what it prints.
pub fn run_demo(demo: Demo) -> String {
    match demo {
        Demo::Counter => counter(),
        Demo::Recover => recover(),
        Demo::Servers => servers(&ServerDirectory::fixture()),
        Demo::Render => triangle(5),
    }
}

fn counter() -> String {
    let below_ten = get_variable("a").map(|a| a < 10.0);
    let program = seq(
        set_variable("a", 0.0),
        while_loop(below_ten, seq(increment_variable("a"), log_memory("counter"))),
    );
    match program.run(Memory::new()) {
        Ok(data) => format!("{}\n", data.state),
        Err(error) => format!("runtime error: {}\n", error),
    }
}

fn recover() -> String {
    let attempt = seq(set_variable("partial", 1.0), increment_variable("missing"));
    let unguarded = seq(set_variable("a", 1.0), attempt.clone());
    let guarded = seq(
        set_variable("a", 1.0),
        try_catch(attempt, set_variable("missing", 0.0)),
    );

    let describe = |outcome: Result<Memory, interpreter::InstructionError>| match outcome {
        Ok(memory) => memory.to_string(),
        Err(error) => format!("runtime error: {}", error),
    };
    format!(
        "without recovery: {}\nwith recovery:    {}\n",
        describe(unguarded.run(Memory::new()).map(|d| d.state)),
        describe(guarded.run(Memory::new()).map(|d| d.state)),
    )
}

fn servers(directory: &ServerDirectory) -> String {
    let fetch = directory.fetch();
    let fetch_checked = directory.fetch_checked();
    directory
        .servers()
        .iter()
        .map(|server| {
            let plain = fetch
                .call(server.ip.clone())
                .map(|c| c.content)
                .unwrap_or_else(|| "-".to_string());
            let checked = match fetch_checked.call(server.ip.clone()) {
                Either::Right(content) => format!("ok: {}", content.content),
                Either::Left(reason) => format!("error: {}", reason),
            };
            format!("{:<16} {:<20} {}\n", server.ip, plain, checked)
        })
        .collect()
}

fn triangle(height: i64) -> String {
    let drawing: Renderer = (1..=height).fold(render::render_nothing(), |drawing, width| {
        drawing.then_run(render::render_line(width))
    });
    render::render(&drawing)
}
