mod reconciler;
