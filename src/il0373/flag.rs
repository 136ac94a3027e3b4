/// Flags and register values for the IL0373 controller.
///
/// Values follow the GoodDisplay 4-grey reference code for this panel
/// family; the datasheet defaults differ in a few places and are noted
/// inline.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Panel Setting (0x00) flags
    pub const PANEL_LUT_FROM_OTP: u8 = 0xCF; // 128x296, LUT from OTP
    pub const PANEL_LUT_FROM_REGISTER: u8 = 0x3F; // 128x296, register LUT (required for 4 grey)

    // Power Setting (0x01) values
    pub const POWER_VDS_VDG_INTERNAL: u8 = 0x03;
    pub const POWER_VCOM_VGHL_LV: u8 = 0x00;
    pub const POWER_VDH_11V: u8 = 0x2B;
    pub const POWER_VDL_11V: u8 = 0x2B;
    pub const POWER_VDHR_4V2: u8 = 0x13;

    // Booster Soft Start (0x06) phases
    pub const BOOSTER_PHASE_DEFAULT: u8 = 0x17;

    // PLL Control (0x30) frame rates
    pub const PLL_100_HZ: u8 = 0x3C;
    pub const PLL_50_HZ: u8 = 0x3A;

    // VCOM and Data Interval (0x50) flags
    pub const VCOM_DATA_INTERVAL_DEFAULT: u8 = 0x97; // white border, 10 interval
    pub const VCOM_DATA_INTERVAL_GREY: u8 = 0x57;

    // VCM DC Setting (0x82) values
    pub const VCM_DC_MINUS_1V0: u8 = 0x12;

    // Deep Sleep (0x07) check code
    pub const DEEP_SLEEP_CHECK: u8 = 0xA5;
}
