use ulid::Ulid;

pub const ID_LEN: usize = 6;

/// Generate a short id from the random tail of a fresh ULID, retrying while
/// `taken` reports a clash.
pub fn new_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let ulid = Ulid::new().to_string().to_ascii_lowercase();
        let id = ulid[ulid.len() - ID_LEN..].to_string();
        if !taken(&id) {
            return id;
        }
    }
}
