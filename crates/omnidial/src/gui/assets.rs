use crate::config::Config;
use dial::Assets;
use gdk_pixbuf::Pixbuf;

/// Upper bound on decoded image size; drawing scales down from here.
pub const IMAGE_SIZE: i32 = 512;

pub fn load(config: &Config) -> Assets<Pixbuf> {
    let glyph = config.glyph_path();
    Assets::load(glyph.as_deref(), &config.items(), |path| {
        Pixbuf::from_file_at_scale(path, IMAGE_SIZE, IMAGE_SIZE, true)
    })
}
