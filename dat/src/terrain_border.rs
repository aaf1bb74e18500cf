use serial::{FormatVersion, SerialError, Serializer, Versioned};

pub const TILE_TYPE_COUNT: usize = 19;
pub const FRAMES_PER_TILE_TYPE: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameData {
    pub frame_count: i16,
    pub angle_count: i16,
    pub shape_id: i16,
}

impl FrameData {
    pub fn layout(&mut self, s: &mut Serializer<'_, '_>) -> Result<(), SerialError> {
        s.field(&mut self.frame_count)?;
        s.field(&mut self.angle_count)?;
        s.field(&mut self.shape_id)?;

        Ok(())
    }
}

/// Blending between two terrains. Mostly unused after Rise of Rome.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainBorder {
    pub version: FormatVersion,
    pub enabled: i8,
    pub random: i8,
    pub name: String,
    pub name2: String,
    /// Not stored before the AoE beta.
    pub slp: i32,
    pub shape_ptr: i32,
    pub sound_id: i32,
    pub colors: [u8; 3],
    pub is_animated: i8,
    pub animation_frames: i16,
    pub pause_frames: i16,
    pub interval: f32,
    pub pause_between_loops: f32,
    pub frame: i16,
    pub draw_frame: i16,
    pub animate_last: f32,
    pub frame_changed: i8,
    pub drawn: i8,
    /// `[tile type][frame]`
    pub borders: Vec<Vec<FrameData>>,
    // always 0
    pub draw_terrain: i16,
    /// Used for terrain passability checks.
    pub underlay_terrain: i16,
    pub border_style: i16,
}

impl TerrainBorder {
    pub fn new(version: FormatVersion) -> Self {
        Self {
            version,
            enabled: 0,
            random: 0,
            name: String::new(),
            name2: String::new(),
            slp: -1,
            shape_ptr: 0,
            sound_id: -1,
            colors: [0; 3],
            is_animated: 0,
            animation_frames: 0,
            pause_frames: 0,
            interval: 0.,
            pause_between_loops: 0.,
            frame: 0,
            draw_frame: 0,
            animate_last: 0.,
            frame_changed: 0,
            drawn: 0,
            borders: vec![vec![FrameData::default(); FRAMES_PER_TILE_TYPE]; TILE_TYPE_COUNT],
            draw_terrain: 0,
            underlay_terrain: -1,
            border_style: 0,
        }
    }

    pub fn name_size(version: FormatVersion) -> usize {
        if version >= FormatVersion::SWGB {
            17
        } else {
            13
        }
    }

    pub fn size(version: FormatVersion) -> usize {
        let slp = if version >= FormatVersion::AoEBeta { 4 } else { 0 };

        2 + Self::name_size(version) * 2
            + slp
            + 4 * 2
            + 3
            + 1
            + 2 * 2
            + 4 * 2
            + 2 * 2
            + 4
            + 2
            + TILE_TYPE_COUNT * FRAMES_PER_TILE_TYPE * 6
            + 2 * 3
    }
}

impl Default for TerrainBorder {
    fn default() -> Self {
        Self::new(FormatVersion::LATEST)
    }
}

impl Versioned for TerrainBorder {
    type Error = SerialError;
    const NAME: &'static str = "TerrainBorder";

    fn format_version(&self) -> FormatVersion {
        self.version
    }

    fn layout(&mut self, s: &mut Serializer<'_, '_>) -> Result<(), SerialError> {
        let name_size = Self::name_size(s.version());

        s.field(&mut self.enabled)?;
        s.field(&mut self.random)?;
        s.fixed_string(&mut self.name, name_size)?;
        s.fixed_string(&mut self.name2, name_size)?;

        if s.version() >= FormatVersion::AoEBeta {
            s.field(&mut self.slp)?;
        }

        s.field(&mut self.shape_ptr)?;
        s.field(&mut self.sound_id)?;
        s.field(&mut self.colors)?;
        s.field(&mut self.is_animated)?;
        s.field(&mut self.animation_frames)?;
        s.field(&mut self.pause_frames)?;
        s.field(&mut self.interval)?;
        s.field(&mut self.pause_between_loops)?;
        s.field(&mut self.frame)?;
        s.field(&mut self.draw_frame)?;
        s.field(&mut self.animate_last)?;
        s.field(&mut self.frame_changed)?;
        s.field(&mut self.drawn)?;

        s.list(&mut self.borders, TILE_TYPE_COUNT, |s, frames| {
            s.list(frames, FRAMES_PER_TILE_TYPE, |s, frame: &mut FrameData| {
                frame.layout(s)
            })
        })?;

        s.field(&mut self.draw_terrain)?;
        s.field(&mut self.underlay_terrain)?;
        s.field(&mut self.border_style)?;

        Ok(())
    }
}
