//! Process-backed terminal: raw mode on stdin, output on stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};
use std::thread::{self, JoinHandle};

use crate::config::EnvConfig;
use crate::core::terminal::Terminal;

#[cfg(unix)]
use libc::{self, c_int};
#[cfg(unix)]
use signal_hook::iterator::Signals;

type InputHandler = Arc<Mutex<Option<Box<dyn FnMut(String) + Send>>>>;
type ResizeHandler = Arc<Mutex<Option<Box<dyn FnMut() + Send>>>>;

const INPUT_POLL_MS: i32 = 50;

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(unix)]
fn wait_writable(fd: c_int) -> std::io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result > 0 && (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }
        if result > 0 {
            return Err(std::io::Error::other(format!(
                "poll(POLLOUT) returned revents=0x{:x}",
                fds.revents
            )));
        }
    }
}

#[cfg(unix)]
fn write_all_fd(fd: c_int, bytes: &[u8]) -> std::io::Result<()> {
    let mut written = 0;
    while written < bytes.len() {
        let rest = &bytes[written..];
        let result = unsafe { libc::write(fd, rest.as_ptr() as *const libc::c_void, rest.len()) };
        if result < 0 {
            let err = std::io::Error::last_os_error();
            match err.kind() {
                std::io::ErrorKind::Interrupted => continue,
                std::io::ErrorKind::WouldBlock => wait_writable(fd)?,
                _ => return Err(err),
            }
            continue;
        }
        if result == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "write returned 0",
            ));
        }
        written += result as usize;
    }
    Ok(())
}

#[cfg(unix)]
fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

#[cfg(unix)]
fn poll_readable(fd: c_int, timeout_ms: i32) -> bool {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    result > 0 && (fds.revents & libc::POLLIN) != 0
}

#[cfg(unix)]
fn get_termios(fd: c_int) -> std::io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(termios)
}

#[cfg(unix)]
fn set_termios(fd: c_int, termios: &libc::termios) -> std::io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

/// Splits `bytes` into the longest valid UTF-8 prefix and an incomplete tail.
///
/// Invalid bytes in the middle are replaced; only a truncated trailing code
/// point is carried over to the next read.
fn decode_utf8_chunk(bytes: &[u8]) -> (String, Vec<u8>) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), Vec::new()),
        Err(err) if err.error_len().is_none() => {
            let (valid, tail) = bytes.split_at(err.valid_up_to());
            (String::from_utf8_lossy(valid).into_owned(), tail.to_vec())
        }
        Err(_) => (String::from_utf8_lossy(bytes).into_owned(), Vec::new()),
    }
}

#[cfg(unix)]
pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    input_handler: InputHandler,
    resize_handler: ResizeHandler,
    input_thread: Option<JoinHandle<()>>,
    stop_flag: Arc<AtomicBool>,
    write_log_path: Option<PathBuf>,
    write_log_failed: bool,
    write_failed: bool,
    resize_signal_handle: Option<signal_hook::iterator::Handle>,
    resize_thread: Option<JoinHandle<()>>,
}

#[cfg(unix)]
impl ProcessTerminal {
    pub fn new() -> Self {
        Self::with_config(&EnvConfig::from_env())
    }

    pub fn with_config(config: &EnvConfig) -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            original_termios: None,
            input_handler: Arc::new(Mutex::new(None)),
            resize_handler: Arc::new(Mutex::new(None)),
            input_thread: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            write_log_path: config.write_log.clone(),
            write_log_failed: false,
            write_failed: false,
            resize_signal_handle: None,
            resize_thread: None,
        }
    }

    fn enable_raw_mode(&mut self) -> std::io::Result<()> {
        let original = match self.original_termios {
            Some(original) => original,
            None => {
                let original = get_termios(self.stdin_fd)?;
                self.original_termios = Some(original);
                original
            }
        };
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        set_termios(self.stdin_fd, &raw)
    }

    fn restore_raw_mode(&mut self) -> std::io::Result<()> {
        if let Some(original) = self.original_termios.as_ref() {
            set_termios(self.stdin_fd, original)?;
        }
        Ok(())
    }

    fn start_input_thread(&mut self) -> std::io::Result<()> {
        let stdin_fd = self.stdin_fd;
        let input_handler = Arc::clone(&self.input_handler);
        let stop_flag = Arc::clone(&self.stop_flag);

        let thread = thread::Builder::new()
            .name("terminal-input".to_string())
            .spawn(move || {
                let mut buffer = [0u8; 4096];
                let mut carry: Vec<u8> = Vec::new();

                while !stop_flag.load(Ordering::SeqCst) {
                    if !poll_readable(stdin_fd, INPUT_POLL_MS) {
                        continue;
                    }
                    let read_len = unsafe {
                        libc::read(stdin_fd, buffer.as_mut_ptr() as *mut libc::c_void, buffer.len())
                    };
                    if read_len <= 0 {
                        continue;
                    }

                    carry.extend_from_slice(&buffer[..read_len as usize]);
                    let (text, tail) = decode_utf8_chunk(&carry);
                    carry = tail;
                    if text.is_empty() {
                        continue;
                    }

                    if let Some(handler) = lock_unpoisoned(&input_handler).as_mut() {
                        handler(text);
                    }
                }
            })?;
        self.input_thread = Some(thread);
        Ok(())
    }

    fn stop_input_thread(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.input_thread.take() {
            let _ = handle.join();
        }
    }

    fn start_resize_thread(&mut self) -> std::io::Result<()> {
        let mut signals = Signals::new([libc::SIGWINCH])?;
        let handle = signals.handle();
        let resize_handler = Arc::clone(&self.resize_handler);

        let thread = thread::Builder::new()
            .name("terminal-resize".to_string())
            .spawn(move || {
                for _ in signals.forever() {
                    if let Some(handler) = lock_unpoisoned(&resize_handler).as_mut() {
                        handler();
                    }
                }
            })?;

        self.resize_signal_handle = Some(handle);
        self.resize_thread = Some(thread);
        Ok(())
    }

    fn stop_resize_thread(&mut self) {
        if let Some(handle) = self.resize_signal_handle.take() {
            handle.close();
        }
        if let Some(thread) = self.resize_thread.take() {
            let _ = thread.join();
        }
    }

    fn clear_handlers(&self) {
        *lock_unpoisoned(&self.input_handler) = None;
        *lock_unpoisoned(&self.resize_handler) = None;
    }

    fn append_write_log(&mut self, data: &str) {
        if self.write_log_failed {
            return;
        }
        let Some(path) = self.write_log_path.as_ref() else {
            return;
        };
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(data.as_bytes()));
        if let Err(err) = result {
            tracing::warn!(path = %path.display(), error = %err, "disabling terminal write log");
            self.write_log_failed = true;
        }
    }
}

#[cfg(unix)]
impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl Terminal for ProcessTerminal {
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()> {
        *lock_unpoisoned(&self.input_handler) = Some(on_input);
        *lock_unpoisoned(&self.resize_handler) = Some(on_resize);
        self.stop_flag.store(false, Ordering::SeqCst);

        if let Err(err) = self.enable_raw_mode() {
            self.clear_handlers();
            return Err(err);
        }

        let started = self
            .start_resize_thread()
            .and_then(|()| self.start_input_thread());
        if let Err(err) = started {
            self.stop_input_thread();
            self.stop_resize_thread();
            self.clear_handlers();
            let _ = self.restore_raw_mode();
            return Err(err);
        }

        // Deliver an initial resize so the first frame uses the real size.
        unsafe {
            libc::raise(libc::SIGWINCH);
        }
        Ok(())
    }

    fn stop(&mut self) -> std::io::Result<()> {
        self.stop_input_thread();
        self.stop_resize_thread();
        self.clear_handlers();

        // Flush input before leaving raw mode so buffered bytes do not leak to the shell.
        let _ = unsafe { libc::tcflush(self.stdin_fd, libc::TCIFLUSH) };

        self.restore_raw_mode()
    }

    fn write(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        if !self.write_failed {
            if let Err(err) = write_all_fd(self.stdout_fd, data.as_bytes()) {
                tracing::warn!(error = %err, "terminal write failed");
                self.write_failed = true;
            }
        }
        self.append_write_log(data);
    }

    fn columns(&self) -> u16 {
        read_winsize(self.stdout_fd)
            .map(|(cols, _)| cols)
            .unwrap_or(80)
    }

    fn rows(&self) -> u16 {
        read_winsize(self.stdout_fd)
            .map(|(_, rows)| rows)
            .unwrap_or(24)
    }
}

#[cfg(not(unix))]
pub struct ProcessTerminal;

#[cfg(not(unix))]
impl ProcessTerminal {
    pub fn new() -> Self {
        Self
    }

    pub fn with_config(_config: &EnvConfig) -> Self {
        Self
    }
}

#[cfg(not(unix))]
impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(unix))]
impl Terminal for ProcessTerminal {
    fn start(
        &mut self,
        _on_input: Box<dyn FnMut(String) + Send>,
        _on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "process terminal requires a unix tty",
        ))
    }

    fn stop(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn write(&mut self, _data: &str) {}

    fn columns(&self) -> u16 {
        80
    }

    fn rows(&self) -> u16 {
        24
    }
}
