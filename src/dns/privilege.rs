/// Whether the process runs with administrator rights.
/// `None` when the platform gives no answer.
#[cfg(target_os = "windows")]
pub fn is_elevated() -> Option<bool> {
    use windows::Win32::UI::Shell::IsUserAnAdmin;

    // SAFETY: IsUserAnAdmin takes no arguments and only inspects the process token.
    let admin = unsafe { IsUserAnAdmin() };
    Some(admin.as_bool())
}

#[cfg(not(target_os = "windows"))]
pub fn is_elevated() -> Option<bool> {
    None
}
