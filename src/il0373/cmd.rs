pub struct Cmd;
impl Cmd {
    // Init
    pub const PANEL_SETTING: u8 = 0x00;
    pub const POWER_SETTING: u8 = 0x01;
    pub const POWER_OFF: u8 = 0x02;
    pub const POWER_ON: u8 = 0x04;
    pub const BOOSTER_SOFT_START: u8 = 0x06;
    pub const DEEP_SLEEP: u8 = 0x07;
    pub const PLL_CONTROL: u8 = 0x30;
    pub const VCOM_DATA_INTERVAL: u8 = 0x50;
    pub const RESOLUTION_SETTING: u8 = 0x61;
    pub const VCM_DC_SETTING: u8 = 0x82;

    // Update
    pub const DATA_START_TRANSMISSION_1: u8 = 0x10;
    pub const DATA_START_TRANSMISSION_2: u8 = 0x13;
    pub const DISPLAY_REFRESH: u8 = 0x12;

    // Waveform tables, one register per transition
    pub const LUT_VCOM: u8 = 0x20;
    pub const LUT_WHITE_TO_WHITE: u8 = 0x21;
    pub const LUT_BLACK_TO_WHITE: u8 = 0x22;
    pub const LUT_WHITE_TO_BLACK: u8 = 0x23;
    pub const LUT_BLACK_TO_BLACK: u8 = 0x24;
}

/*
UC8151/IL0373 command set used by the GoodDisplay 4-grey reference:
0x00 - Panel Setting
0x01 - Power Setting
0x02 - Power Off
0x04 - Power On
0x06 - Booster Soft Start
0x07 - Deep Sleep
0x10 - Data Start Transmission 1 (old/MSB plane)
0x12 - Display Refresh
0x13 - Data Start Transmission 2 (new/LSB plane)
0x20..0x24 - LUT registers (VCOM, WW, BW, WB, BB)
0x30 - PLL Control
0x50 - VCOM and Data Interval
0x61 - Resolution Setting
0x82 - VCM DC Setting
*/
