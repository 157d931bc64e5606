use std::sync::{Arc, Mutex, MutexGuard};

use pipeline_tui::Terminal;

type InputHandler = Box<dyn FnMut(String) + Send>;
type ResizeHandler = Box<dyn FnMut() + Send>;

pub struct TerminalTrace {
    pub writes: Vec<String>,
    pub start_calls: usize,
    pub stop_calls: usize,
    pub columns: u16,
    pub rows: u16,
    pub on_input: Option<InputHandler>,
    pub on_resize: Option<ResizeHandler>,
}

pub struct SharedTerminal {
    state: Arc<Mutex<TerminalTrace>>,
}

impl SharedTerminal {
    pub fn new(columns: u16, rows: u16) -> (Self, Arc<Mutex<TerminalTrace>>) {
        let state = Arc::new(Mutex::new(TerminalTrace {
            writes: Vec::new(),
            start_calls: 0,
            stop_calls: 0,
            columns,
            rows,
            on_input: None,
            on_resize: None,
        }));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl Terminal for SharedTerminal {
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()> {
        let mut state = lock_unpoisoned(&self.state);
        state.start_calls += 1;
        state.on_input = Some(on_input);
        state.on_resize = Some(on_resize);
        Ok(())
    }

    fn stop(&mut self) -> std::io::Result<()> {
        let mut state = lock_unpoisoned(&self.state);
        state.stop_calls += 1;
        state.on_input = None;
        state.on_resize = None;
        Ok(())
    }

    fn write(&mut self, data: &str) {
        lock_unpoisoned(&self.state).writes.push(data.to_string());
    }

    fn columns(&self) -> u16 {
        lock_unpoisoned(&self.state).columns
    }

    fn rows(&self) -> u16 {
        lock_unpoisoned(&self.state).rows
    }
}

pub fn inject_input(state: &Arc<Mutex<TerminalTrace>>, data: &str) {
    let mut state = lock_unpoisoned(state);
    let Some(on_input) = state.on_input.as_mut() else {
        panic!("terminal input handler is not registered");
    };
    on_input(data.to_string());
}

pub fn inject_resize(state: &Arc<Mutex<TerminalTrace>>, columns: u16, rows: u16) {
    let mut state = lock_unpoisoned(state);
    state.columns = columns;
    state.rows = rows;
    let Some(on_resize) = state.on_resize.as_mut() else {
        panic!("terminal resize handler is not registered");
    };
    on_resize();
}

pub fn rendered_output(state: &Arc<Mutex<TerminalTrace>>) -> String {
    lock_unpoisoned(state).writes.join("")
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
