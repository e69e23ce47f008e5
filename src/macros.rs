// originally by https://github.com/smoltcp-rs/smoltcp/blob/master/src/macros.rs
#[cfg(not(test))]
#[cfg(feature = "log")]
macro_rules! calc_log {
    (trace, $($arg:expr),*) => { log::trace!($($arg),*) };
    (debug, $($arg:expr),*) => { log::debug!($($arg),*) };
    (info, $($arg:expr),*) => { log::info!($($arg),*) };
}

#[cfg(test)]
#[cfg(feature = "log")]
macro_rules! calc_log {
    (trace, $($arg:expr),*) => { println!($($arg),*) };
    (debug, $($arg:expr),*) => { println!($($arg),*) };
    (info, $($arg:expr),*) => { println!($($arg),*) };
}

#[cfg(not(feature = "log"))]
macro_rules! calc_log {
    ($level:ident, $($arg:expr),*) => {{ $( let _ = $arg; )* }}
}

macro_rules! calc_trace {
    ($($arg:expr),*) => (calc_log!(trace, $($arg),*));
}

macro_rules! calc_debug {
    ($($arg:expr),*) => (calc_log!(debug, $($arg),*));
}

macro_rules! calc_info {
    ($($arg:expr),*) => (calc_log!(info, $($arg),*));
}
