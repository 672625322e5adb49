use crate::fun::Fun;
use crate::state::{StateData, StatefulFun};

/// A step that appends to a text buffer threaded through as state.
pub type Renderer = StatefulFun<String, ()>;

pub fn render_nothing() -> Renderer {
    StatefulFun::unit(())
}

pub fn render_string(text: impl Into<String>) -> Renderer {
    let text = text.into();
    StatefulFun::new(move |mut buffer: String| {
        buffer.push_str(&text);
        StateData::new(buffer, ())
    })
}

pub fn render_asterisk() -> Renderer {
    render_string("*")
}

pub fn render_space() -> Renderer {
    render_string(" ")
}

pub fn render_newline() -> Renderer {
    render_string("\n")
}

/// `width` asterisks followed by a newline.
pub fn render_line(width: i64) -> Renderer {
    let widen = Fun::new(|line: Renderer| line.then_run(render_asterisk()));
    widen
        .repeat(width)
        .call(render_nothing())
        .then_run(render_newline())
}

/// Render a buffer from scratch.
pub fn render(renderer: &Renderer) -> String {
    renderer.run(String::new()).state
}
