//! Affiliate invitations and the cross-organization scope they grant.

mod common;

use retail_backoffice::config::MAX_PENDING_INVITES;
use retail_backoffice::domain::{DateRange, InvitationState};
use retail_backoffice::errors::{AppError, ConflictKind};
use retail_backoffice::infra::repositories::InvitationFilter;
use retail_backoffice::services::{ServiceContainer, SignupInput};
use retail_backoffice::utils::now_millis;

use common::{setup, setup_with, signup};

#[tokio::test]
async fn test_invite_code_is_single_use() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;

    let invitation = app
        .services
        .invitations()
        .create(&acme.org_ctx())
        .await
        .unwrap();
    let code = invitation.code.clone().expect("pending invitation has a code");
    assert!(matches!(
        invitation.state(now_millis()),
        InvitationState::Pending { .. }
    ));

    let beta = signup(&app, "Beta", Some(code.clone())).await;

    let activated = app
        .services
        .invitations()
        .list(&acme.org_ctx(), InvitationFilter::Activated)
        .await
        .unwrap();
    assert_eq!(activated.len(), 1);
    assert_eq!(activated[0].affiliate_org_id, Some(beta.org_id));
    assert!(activated[0].code.is_none());

    let reuse = app
        .services
        .auth()
        .signup(SignupInput {
            name: "Gamma".to_string(),
            email: "gamma@example.com".to_string(),
            password: "SecurePass123!".to_string(),
            invite_code: Some(code),
        })
        .await;
    assert!(matches!(reuse, Err(AppError::InvalidInviteCode)));
}

#[tokio::test]
async fn test_expired_code_rejected_and_swept() {
    let app = setup_with(|config| config.invite_ttl_hours = 0).await;
    let acme = signup(&app, "Acme", None).await;
    let invitations = app.services.invitations();

    let invitation = invitations.create(&acme.org_ctx()).await.unwrap();
    let result = app
        .services
        .auth()
        .signup(SignupInput {
            name: "Late".to_string(),
            email: "late@example.com".to_string(),
            password: "SecurePass123!".to_string(),
            invite_code: invitation.code.clone(),
        })
        .await;
    assert!(matches!(result, Err(AppError::InvalidInviteCode)));

    let now = now_millis() + 1;
    assert_eq!(invitations.sweep_expired(now).await.unwrap(), 1);
    // Idempotent
    assert_eq!(invitations.sweep_expired(now).await.unwrap(), 0);
    assert!(invitations
        .list(&acme.org_ctx(), InvitationFilter::All)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_sweep_keeps_activated_invitations() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let invitations = app.services.invitations();

    let invitation = invitations.create(&acme.org_ctx()).await.unwrap();
    signup(&app, "Beta", invitation.code.clone()).await;

    let far_future = now_millis() + 365 * 24 * 3_600_000;
    assert_eq!(invitations.sweep_expired(far_future).await.unwrap(), 0);
    assert_eq!(
        invitations
            .list(&acme.org_ctx(), InvitationFilter::Activated)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_affiliate_cannot_issue_invitations() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let code = app
        .services
        .invitations()
        .create(&acme.org_ctx())
        .await
        .unwrap()
        .code;
    let beta = signup(&app, "Beta", code).await;

    let result = app.services.invitations().create(&beta.org_ctx()).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn test_only_owner_manages_invitations() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;

    let result = app.services.invitations().create(&acme.cashier_ctx()).await;
    assert!(matches!(result, Err(AppError::Forbidden)));

    let missing = app.services.invitations().delete(&acme.org_ctx(), 999).await;
    assert!(matches!(missing, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_issuer_reads_affiliate_data_read_only() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let code = app
        .services
        .invitations()
        .create(&acme.org_ctx())
        .await
        .unwrap()
        .code;
    let beta = signup(&app, "Beta", code).await;

    // Acme's owner sees Beta's outlets through the affiliate link
    let outlets = app
        .services
        .outlets()
        .list(&acme.viewing(beta.org_id))
        .await
        .unwrap();
    assert_eq!(outlets.len(), 1);
    assert_eq!(outlets[0].org_id, beta.org_id);

    let sessions = app
        .services
        .sessions()
        .list(&acme.viewing(beta.org_id), DateRange::default())
        .await
        .unwrap();
    assert!(sessions.is_empty());

    // but cannot write there
    let write = app
        .services
        .outlets()
        .create(&acme.viewing(beta.org_id), "Kiosk".to_string())
        .await;
    assert!(matches!(write, Err(AppError::Forbidden)));

    // The link is one-way: Beta's override of Acme is ignored
    let reverse = app
        .services
        .outlets()
        .list(&beta.viewing(acme.org_id))
        .await
        .unwrap();
    assert!(reverse.iter().all(|o| o.org_id == beta.org_id));
}

#[tokio::test]
async fn test_pending_invitation_quota() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let invitations = app.services.invitations();

    let mut issued = Vec::new();
    for _ in 0..MAX_PENDING_INVITES {
        issued.push(invitations.create(&acme.org_ctx()).await.unwrap());
    }

    let over = invitations.create(&acme.owner_ctx()).await;
    assert!(matches!(
        over,
        Err(AppError::StateConflict(ConflictKind::InviteQuota))
    ));
    let pending = invitations
        .list(&acme.org_ctx(), InvitationFilter::NotActivated)
        .await
        .unwrap();
    assert_eq!(pending.len() as u64, MAX_PENDING_INVITES);

    // Activating one frees a slot
    let code = issued[0].code.clone().unwrap();
    signup(&app, "Beta", Some(code)).await;
    invitations.create(&acme.org_ctx()).await.unwrap();

    // So does deleting one
    assert!(invitations.create(&acme.org_ctx()).await.is_err());
    invitations.delete(&acme.org_ctx(), issued[1].id).await.unwrap();
    invitations.create(&acme.org_ctx()).await.unwrap();
}
