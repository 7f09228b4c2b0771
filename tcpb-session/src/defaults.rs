// the compute server always runs on the same machine
pub const HOST: &str = "localhost";
// delay before every energy/gradient request in ms. The server needs a short
// pause between two consecutive calls.
pub const CALL_DELAY: u64 = 10;
// interval between two job status requests in ms
pub const POLL_INTERVAL: u64 = 50;
// print level
pub const VERBOSE: i8 = 0;
