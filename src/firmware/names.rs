use std::borrow::Cow;

/// Names of the netlist archive sections, indexed by entry ID.
///
/// Taken from the nvgpu `gr_ctx` netlist region IDs.
pub const SECTION_NAMES: [&str; 36] = [
    "fecs_data",
    "fecs_inst",
    "gpccs_data",
    "gpccs_inst",
    "sw_bundle_init",
    "sw_ctx",
    "sw_nonctx",
    "sw_method_init",
    "ctxreg_sys",
    "ctxreg_gpc",
    "ctxreg_tpc",
    "ctxreg_zcull_gpc",
    "ctxreg_pm_sys",
    "ctxreg_pm_gpc",
    "ctxreg_pm_tpc",
    "majorv",
    "buffer_size",
    "ctxsw_reg_base_index",
    "netlist_num",
    "ctxreg_ppc",
    "ctxreg_pmppc",
    "nvperf_ctxreg_sys",
    "nvperf_fbp_ctxregs",
    "nvperf_ctxreg_gpc",
    "nvperf_fbp_router",
    "nvperf_gpc_router",
    "ctxreg_pmltc",
    "ctxreg_pmfbpa",
    "swveidbundleinit",
    "nvperf_sys_router",
    "nvperf_pma",
    "ctxreg_pmrop",
    "ctxreg_pmucgpc",
    "ctxreg_etpc",
    "sw_bundle64_init",
    "nvperf_pmcau",
];

/// Known name for a section ID.
pub fn known_name(id: i32) -> Option<&'static str> {
    usize::try_from(id)
        .ok()
        .and_then(|i| SECTION_NAMES.get(i))
        .copied()
}

/// File name for a section ID: the known name, or `unk<id>`.
pub fn section_name(id: i32) -> Cow<'static, str> {
    match known_name(id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("unk{id}")),
    }
}
