// Server-rendered HTML. Every function here is pure: it takes view data and
// returns a complete document string.

pub mod landing;
pub mod layout;
pub mod results;
pub mod reveal;
pub mod upload;
