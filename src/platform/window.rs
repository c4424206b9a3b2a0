//! Win32 window shell
//!
//! Registers the window class, runs the message loop, and translates raw
//! window messages into the application's semantic input events. Painting
//! blits the tiny-skia pixmap produced by the renderer; no GDI drawing
//! primitives are used beyond the blit.

use std::ffi::c_void;

use thiserror::Error;
use tracing::warn;

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BeginPaint, DIB_RGB_COLORS, EndPaint, HBRUSH,
    InvalidateRect, PAINTSTRUCT, SRCCOPY, StretchDIBits,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, VK_CONTROL, VK_ESCAPE, VK_RETURN, VK_SHIFT,
};
use windows::Win32::UI::Shell::ShellExecuteW;
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRect, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW, DispatchMessageW,
    GWLP_USERDATA, GetClientRect, GetMessageW, GetWindowLongPtrW, MSG, PostQuitMessage,
    RegisterClassW, SW_SHOWNORMAL, SetWindowLongPtrW, TranslateMessage, WINDOW_EX_STYLE,
    WM_DESTROY, WM_KEYDOWN, WM_LBUTTONDOWN, WM_MOUSEWHEEL, WM_PAINT, WM_RBUTTONDOWN, WM_SIZE,
    WNDCLASSW, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
};
use windows::core::w;

use crate::app::{AppContext, EventOutcome, InputEvent};
use crate::ui::renderer::{SceneLayout, pixmap_to_bgra};
use crate::ui::SceneRenderer;

/// Errors from the window shell; the only fatal paths in the program
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to register window class")]
    ClassRegistrationFailed,
    #[error("failed to create window")]
    WindowCreationFailed,
}

/// State reachable from the window procedure via GWLP_USERDATA
struct WindowShell<'a> {
    ctx: &'a mut AppContext,
    renderer: SceneRenderer,
}

/// Creates the window and runs the message loop until quit
///
/// The context carries the loaded settings in; on return it holds the live
/// state for the shutdown save.
pub fn run(ctx: &mut AppContext) -> Result<(), PlatformError> {
    let mut shell = WindowShell {
        ctx,
        renderer: SceneRenderer::new(),
    };

    unsafe {
        let instance = GetModuleHandleW(None).map_err(|_| PlatformError::ClassRegistrationFailed)?;

        let class_name = w!("GridmarkCanvasClass");
        let wc = WNDCLASSW {
            lpfnWndProc: Some(canvas_window_proc),
            hInstance: instance.into(),
            lpszClassName: class_name,
            // Every pixel is painted from the pixmap, so no class brush.
            hbrBackground: HBRUSH(0),
            ..Default::default()
        };
        if RegisterClassW(&wc) == 0 {
            return Err(PlatformError::ClassRegistrationFailed);
        }

        // Grow the outer rectangle so the client area matches the persisted
        // extent exactly.
        let mut rect = windows::Win32::Foundation::RECT {
            left: 0,
            top: 0,
            right: shell.ctx.window_width(),
            bottom: shell.ctx.window_height(),
        };
        let _ = AdjustWindowRect(&mut rect, WS_OVERLAPPEDWINDOW, false);

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            class_name,
            w!("Circles & Crosses"),
            WS_OVERLAPPEDWINDOW | WS_VISIBLE,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            rect.right - rect.left,
            rect.bottom - rect.top,
            None,
            None,
            instance,
            None,
        );
        if hwnd.0 == 0 {
            return Err(PlatformError::WindowCreationFailed);
        }

        // Paints arriving before this see a null shell and fall through to
        // the default handler; repaint once the pointer is in place.
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, &mut shell as *mut _ as isize);
        let _ = InvalidateRect(hwnd, None, true);

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    Ok(())
}

/// Maps a window message to a semantic input event, if it carries one
fn translate_message(msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<InputEvent> {
    match msg {
        WM_KEYDOWN => {
            let key = wparam.0 as u32;
            let ctrl_down = unsafe { GetKeyState(VK_CONTROL.0 as i32) } as u16 & 0x8000 != 0;
            let shift_down = unsafe { GetKeyState(VK_SHIFT.0 as i32) } as u16 & 0x8000 != 0;

            if key == VK_ESCAPE.0 as u32 || (ctrl_down && key == 'Q' as u32) {
                Some(InputEvent::QuitRequested)
            } else if key == VK_RETURN.0 as u32 {
                Some(InputEvent::EnterPressed)
            } else if shift_down && key == 'C' as u32 {
                Some(InputEvent::EditorRequested)
            } else {
                None
            }
        }
        WM_MOUSEWHEEL => Some(InputEvent::WheelScroll {
            delta: ((wparam.0 >> 16) & 0xffff) as i16 as i32,
        }),
        WM_LBUTTONDOWN => Some(InputEvent::LeftClick {
            x: (lparam.0 & 0xffff) as i16 as i32,
            y: ((lparam.0 >> 16) & 0xffff) as i16 as i32,
        }),
        WM_RBUTTONDOWN => Some(InputEvent::RightClick {
            x: (lparam.0 & 0xffff) as i16 as i32,
            y: ((lparam.0 >> 16) & 0xffff) as i16 as i32,
        }),
        WM_SIZE => Some(InputEvent::WindowResized {
            width: (lparam.0 & 0xffff) as i32,
            height: ((lparam.0 >> 16) & 0xffff) as i32,
        }),
        _ => None,
    }
}

unsafe extern "system" fn canvas_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let shell_ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *mut WindowShell;
    if shell_ptr.is_null() {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }
    let shell = unsafe { &mut *shell_ptr };

    match msg {
        WM_PAINT => {
            unsafe { paint(hwnd, shell) };
            LRESULT(0)
        }
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        _ => match translate_message(msg, wparam, lparam) {
            Some(event) => {
                match shell.ctx.handle_event(event) {
                    EventOutcome::Redraw => unsafe {
                        let _ = InvalidateRect(hwnd, None, true);
                    },
                    EventOutcome::Quit => unsafe { PostQuitMessage(0) },
                    EventOutcome::LaunchEditor => unsafe {
                        ShellExecuteW(
                            HWND(0),
                            w!("open"),
                            w!("notepad.exe"),
                            None,
                            None,
                            SW_SHOWNORMAL,
                        );
                    },
                    EventOutcome::Ignored => {}
                }
                LRESULT(0)
            }
            None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        },
    }
}

unsafe fn paint(hwnd: HWND, shell: &mut WindowShell) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);

        // Render from live client extent rather than the last WM_SIZE value
        // so the first paint after creation is correct too.
        let mut client = windows::Win32::Foundation::RECT::default();
        let _ = GetClientRect(hwnd, &mut client);
        let _ = shell.ctx.handle_event(InputEvent::WindowResized {
            width: client.right - client.left,
            height: client.bottom - client.top,
        });

        let layout = SceneLayout::from_context(shell.ctx);
        match shell.renderer.render(&layout) {
            Ok(pixmap) => {
                let bgra = pixmap_to_bgra(&pixmap);
                let mut info = BITMAPINFO::default();
                info.bmiHeader = BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: pixmap.width() as i32,
                    // Negative height marks a top-down DIB.
                    biHeight: -(pixmap.height() as i32),
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                };
                StretchDIBits(
                    hdc,
                    0,
                    0,
                    pixmap.width() as i32,
                    pixmap.height() as i32,
                    0,
                    0,
                    pixmap.width() as i32,
                    pixmap.height() as i32,
                    Some(bgra.as_ptr() as *const c_void),
                    &info,
                    DIB_RGB_COLORS,
                    SRCCOPY,
                );
            }
            Err(err) => warn!(error = %err, "frame rendering failed"),
        }

        let _ = EndPaint(hwnd, &ps);
    }
}
