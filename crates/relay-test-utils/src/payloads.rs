//! Canned response bodies in the coordination service's wire format.

use serde_json::{Value, json};

/// A `check_status` body with no locks and a PROCEED instruction.
pub fn check_status_ok() -> Value {
    json!({
        "status": "OK",
        "repo_head": "abc123",
        "locks": {},
        "warnings": [],
        "orchestration": {
            "type": "orchestration_command",
            "action": "PROCEED",
            "command": null,
            "reason": "No conflicts",
            "metadata": null
        }
    })
}

/// A `check_status` body where `src/auth.ts` is being written by `user`.
pub fn check_status_conflict(user: &str) -> Value {
    json!({
        "status": "CONFLICT",
        "repo_head": "abc123",
        "locks": {
            "src/auth.ts": {
                "user": user,
                "status": "WRITING",
                "lock_type": "DIRECT",
                "timestamp": 1718000000.5,
                "message": "refactoring login"
            }
        },
        "warnings": ["src/auth.ts is locked"],
        "orchestration": {
            "type": "orchestration_command",
            "action": "SWITCH_TASK",
            "command": null,
            "reason": "File locked by another user",
            "metadata": {"holder": user}
        }
    })
}

/// A successful `post_status` body reporting orphaned dependencies.
pub fn post_status_success() -> Value {
    json!({
        "success": true,
        "orphaned_dependencies": ["src/db.ts"],
        "orchestration": {
            "type": "orchestration_command",
            "action": "PUSH",
            "command": "git push",
            "reason": "Lock released",
            "metadata": null
        }
    })
}
