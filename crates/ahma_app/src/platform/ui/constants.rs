pub const CMD_HELP: &str = "/help";
pub const CMD_QUIT: &str = "/quit";
pub const CMD_CALENDAR: &str = "/calendar";
pub const CMD_TASKS: &str = "/tasks";
pub const CMD_FILES: &str = "/files";
pub const CMD_UPLOAD: &str = "/upload";
pub const CMD_PROCESS: &str = "/process";
pub const CMD_DOWNLOAD: &str = "/download";
pub const CMD_DONE: &str = "/done";
pub const CMD_INSURANCE: &str = "/insurance";
